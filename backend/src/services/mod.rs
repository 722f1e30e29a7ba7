pub mod dropdown;
pub mod planners;
pub mod systems;
