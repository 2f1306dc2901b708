pub mod assignment;
pub mod c_arc;
pub mod formation;
pub mod intercept;
pub mod no_formation;
pub mod pursuit;
pub mod role_swap;
pub mod triangulation;
