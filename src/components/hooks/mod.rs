pub mod use_dynamic_options;
pub mod use_pagination;

pub(crate) use use_dynamic_options::{use_dynamic_options, UseDynamicOptions};
pub(crate) use use_pagination::use_pagination;
