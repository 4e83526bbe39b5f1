pub use prost::Message;
pub use serde::{Deserialize, Serialize};
pub use strum::{Display, EnumString};
