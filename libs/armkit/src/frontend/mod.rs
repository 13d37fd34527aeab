//! Resource-type agnostic list controller.

mod error;
mod list;
mod next_link;

pub use error::ControllerError;
pub use list::{ListOperation, ListResources};
pub use next_link::{SKIP_TOKEN_PARAM, next_link_url};

pub(crate) use next_link::is_skip_token_param;
