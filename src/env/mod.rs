pub mod isolated;

pub use isolated::{EnvStatus, IsolatedEnv};
