mod interaction;
mod view;

const NODE_HIT_RADIUS: f32 = 14.0;
const NODE_CORE_RADIUS: f32 = 5.5;
const NODE_GLOW_RADIUS: f32 = 15.0;
const SKELETON_NODE_RADIUS: f32 = 1.8;
