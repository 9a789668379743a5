pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{ApiState, DemoDataset};
