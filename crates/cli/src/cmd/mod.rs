mod cleanup;
mod expand;
mod inputs;
mod normalize;
mod plan;

pub use cleanup::cmd_cleanup_script;
pub use expand::cmd_expand;
pub use inputs::InjectionArgs;
pub use normalize::cmd_normalize;
pub use plan::cmd_plan;
