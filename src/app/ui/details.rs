use eframe::egui::{self, Color32, RichText, Ui};

use watch_constellation::constellation::neighbors;

use super::super::{ViewModel, WatchAction};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        if let Some(error) = &self.storage_error {
            ui.colored_label(
                Color32::from_rgb(240, 120, 100),
                format!("Could not save the watchlist: {error}"),
            );
            ui.separator();
        }

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a star to see what it is.");
            return;
        };

        let Some(entry) = self.watchlist.get(&selected_id).cloned() else {
            ui.label("That title is no longer on your watchlist.");
            return;
        };

        ui.label(RichText::new(entry.title.as_str()).strong().size(18.0));
        let mut facts = vec![entry.media_type.label().to_owned()];
        if let Some(year) = entry.release_year {
            facts.push(year.to_string());
        }
        if entry.rating > 0.0 {
            facts.push(format!("rated {:.1}", entry.rating));
        }
        ui.label(facts.join("  |  "));

        if !entry.genres.is_empty() {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for genre in &entry.genres {
                    ui.label(
                        RichText::new(genre.as_str())
                            .small()
                            .color(Color32::from_rgb(170, 190, 240)),
                    );
                }
            });
        }

        if !entry.overview.is_empty() {
            ui.add_space(6.0);
            ui.label(entry.overview.as_str());
        }

        ui.separator();
        ui.label(RichText::new("Linked titles").strong());
        let mut linked = neighbors(self.scene.similarity_edges(), &selected_id)
            .filter_map(|(id, weight)| {
                self.scene
                    .item(id)
                    .map(|item| (id.to_owned(), item.title.clone(), weight))
            })
            .collect::<Vec<_>>();
        linked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

        if linked.is_empty() {
            ui.label("Nothing else on your list shares its genres.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("linked_titles_scroll")
                .max_height(240.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for (id, title, weight) in linked {
                        let label = format!("{title}  (shared {weight})");
                        if ui.link(label).clicked() {
                            self.set_selected(Some(id));
                        }
                    }
                });
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Deselect").clicked() {
                self.set_selected(None);
            }
            if ui
                .button(
                    RichText::new("Remove from watchlist").color(Color32::from_rgb(240, 140, 120)),
                )
                .clicked()
            {
                self.request(WatchAction::Remove(selected_id.clone()));
            }
        });
    }
}
