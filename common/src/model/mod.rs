pub mod dropdown;
pub mod pagination;
pub mod planner;
pub mod system;
