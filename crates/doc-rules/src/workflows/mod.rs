pub mod intake;
pub mod router;
pub mod rules;

#[cfg(test)]
pub(crate) mod test_support;

pub use router::admin_router;
