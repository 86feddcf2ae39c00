// sign-domain library entry point
pub mod argument;
pub mod block;
pub mod descriptor;
pub mod error;
pub use argument::{render_argument_string, ArgumentPair};
pub use block::{ContextBlock, SignatureRecord, SigningBlock, TargetOverride, SIGNING_KIND};
pub use descriptor::{ToolDescriptor, ToolKind, Version};
pub use error::DomainError;
