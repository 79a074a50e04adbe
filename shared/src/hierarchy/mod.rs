pub mod hierarchy_hasher;
pub mod scene_graph;

#[cfg(test)]
pub(crate) mod test_scene;
