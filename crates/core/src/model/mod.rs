// Binding model: asset -> action map -> action -> binding.
pub mod action;
pub mod action_map;
pub mod asset;
pub mod binding;
pub mod handle;
