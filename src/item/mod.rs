// Card item module
//
// This module provides the card data model:
// - Card definitions and the registry that owns them
// - Card stacks for quantity management
// - Id allocation shared by every collection on the table

pub mod definition;
pub mod id;
pub mod registry;
pub mod stack;

// Re-export main types for convenient access
pub use definition::CardDefinition;
pub use id::{CardId, IdAllocator, IdsExhausted};
pub use registry::{CardRegistry, RegistryError};
pub use stack::CardStack;
