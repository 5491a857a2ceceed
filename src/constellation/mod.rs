mod collision;
mod integrator;
mod item;
mod particles;
mod reconcile;
mod render_loop;
mod scene;
mod similarity;
mod skeleton;
mod snapshot;
mod viewport;

pub use collision::{CollisionParams, resolve_collisions};
pub use integrator::{
    Centering, ForceTerm, Integrator, IntegratorParams, Jitter, ManyBodyRepulsion, ParamsError,
    Spring,
};
pub use item::{Item, ItemKind};
pub use particles::{Particle, ParticleStore};
pub use reconcile::{ReconcileReport, reconcile};
pub use render_loop::{CancellationToken, RenderLoop, ScheduledTick, TickOutcome};
pub use scene::{Scene, SceneEvent, SceneParams};
pub use similarity::{
    SimilarityEdge, SimilarityRule, build_similarity_edges, edge_strength, neighbors, pair_weight,
};
pub use skeleton::{
    ClusterDefinition, ClusterLink, ClusterNode, Point, SkeletonEdge, build_skeleton_edges,
    build_skeleton_particles, skeleton_particle_id,
};
pub use snapshot::{NodeView, ScreenNode, WorldSnapshot};
pub use viewport::{DragState, PointerEvent, Viewport};
