use eframe::egui::{self, Key, Response, RichText, Ui};
use log::debug;

use watch_constellation::constellation::{IntegratorParams, SceneParams, SimilarityRule};

use super::super::{ViewModel, WatchAction};

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;
const SEARCH_RESULT_LIMIT: usize = 8;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

fn default_slider_key_step(min: f32, max: f32) -> f32 {
    ((max - min) / 200.0).max(0.00005)
}

fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    min: f32,
    max: f32,
    step: f32,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    if increase_down {
        hold_state.positive_secs += delta_time;
    } else {
        hold_state.positive_secs = 0.0;
    }

    if decrease_down {
        hold_state.negative_secs += delta_time;
    } else {
        hold_state.negative_secs = 0.0;
    }

    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));

    let direction = (increase_down as i8) - (decrease_down as i8);
    if direction == 0 {
        return false;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
    let delta = direction as f32 * step * speed * delta_time;

    let old_value = *value;
    *value = (*value + delta).clamp(min, max);
    (*value - old_value).abs() > f32::EPSILON
}

fn tuning_slider(
    ui: &mut Ui,
    value: &mut f32,
    min: f32,
    max: f32,
    text: &str,
    hover: &str,
) -> bool {
    let response = ui
        .add(
            egui::Slider::new(value, min..=max)
                .text(text)
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text(hover);
    if response.hovered() {
        response.request_focus();
    }

    let mut changed = response.changed();
    changed |= apply_slider_arrow_acceleration(
        ui,
        &response,
        value,
        min,
        max,
        default_slider_key_step(min, max),
    );
    changed
}

fn population_sliders(ui: &mut Ui, params: &mut IntegratorParams) -> bool {
    let mut changed = false;
    changed |= tuning_slider(
        ui,
        &mut params.spring,
        0.0,
        0.08,
        "Spring",
        "Pull toward the home position each frame.",
    );
    changed |= tuning_slider(
        ui,
        &mut params.damping,
        0.5,
        0.97,
        "Damping",
        "Share of velocity kept from one frame to the next.",
    );
    changed |= tuning_slider(
        ui,
        &mut params.jitter,
        0.0,
        0.5,
        "Shimmer",
        "Random drift added every frame.",
    );
    changed
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Sky Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.checkbox(&mut self.live_physics, "Live physics")
            .on_hover_text("Keep the constellation moving. Off freezes every star in place.");
        ui.checkbox(&mut self.show_links, "Show similarity links")
            .on_hover_text("Draw lines between titles that share genres.");
        ui.checkbox(&mut self.show_skeleton, "Show constellations")
            .on_hover_text("Draw the decorative cluster figures behind your titles.");
        ui.checkbox(&mut self.show_fps_bar, "FPS display")
            .on_hover_text("Show a live FPS readout in the header.");
        if ui
            .button("Reset camera")
            .on_hover_text("Return the view to its start. Double-clicking the sky does the same.")
            .clicked()
        {
            self.scene.reset_camera();
            debug!("event=camera_reset trigger=button");
        }

        ui.separator();
        self.draw_catalog_search(ui);

        ui.separator();
        ui.collapsing("Physics tuning", |ui| self.draw_tuning(ui));
    }

    fn draw_catalog_search(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Add titles").strong());
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy search over the bundled catalog.");

        let results = self
            .catalog
            .search(&self.search, SEARCH_RESULT_LIMIT)
            .into_iter()
            .map(|entry| {
                let year = entry
                    .release_year
                    .map_or_else(String::new, |year| format!(" ({year})"));
                (
                    entry.watch_id(),
                    format!("{}{year}", entry.title),
                    entry.media_type.label(),
                )
            })
            .collect::<Vec<_>>();

        if results.is_empty() {
            ui.label("No titles match that search.");
            return;
        }

        for (id, title, kind) in results {
            let saved = self.watchlist.contains(&id);
            ui.horizontal(|ui| {
                let label = if saved { "Saved" } else { "Add" };
                if ui
                    .add_enabled(!saved, egui::Button::new(label))
                    .clicked()
                {
                    self.request(WatchAction::Add(id.clone()));
                }
                ui.label(title);
                ui.weak(kind);
            });
        }
    }

    fn draw_tuning(&mut self, ui: &mut Ui) {
        let mut params = self.params;
        let mut changed = false;

        let mut force_layout = params.items == IntegratorParams::FORCE_LAYOUT;
        if ui
            .checkbox(&mut force_layout, "Free force layout")
            .on_hover_text("Let titles repel each other instead of circling their constellations.")
            .changed()
        {
            params.items = if force_layout {
                IntegratorParams::FORCE_LAYOUT
            } else {
                IntegratorParams::ITEMS
            };
            changed = true;
        }

        let mut kind_counts = params.similarity != SimilarityRule::TAGS_ONLY;
        if ui
            .checkbox(&mut kind_counts, "Matching type counts as shared")
            .on_hover_text("Two films or two series get one extra point of similarity.")
            .changed()
        {
            params.similarity = if kind_counts {
                SimilarityRule::default()
            } else {
                SimilarityRule::TAGS_ONLY
            };
            changed = true;
        }

        ui.label(RichText::new("Titles").strong());
        changed |= population_sliders(ui, &mut params.items);

        ui.label(RichText::new("Constellations").strong());
        changed |= population_sliders(ui, &mut params.skeleton);

        ui.label(RichText::new("Collisions").strong());
        changed |= tuning_slider(
            ui,
            &mut params.collision.min_separation,
            0.0,
            120.0,
            "Personal space",
            "Titles closer than this push each other away.",
        );
        changed |= tuning_slider(
            ui,
            &mut params.collision.strength,
            0.0,
            0.05,
            "Push strength",
            "How hard overlapping titles are pushed apart.",
        );

        if ui.button("Restore defaults").clicked() {
            params = SceneParams::default();
            changed = true;
        }

        if changed {
            self.apply_params(params);
        }

        if let Some(error) = &self.params_error {
            ui.colored_label(egui::Color32::from_rgb(240, 120, 100), error.as_str());
        }
    }
}
