pub mod bendy_ruler;
pub mod local_planner;
pub mod no_local_plan;
