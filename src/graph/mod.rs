//! Source graph model
//!
//! Ownership is a strict tree: Project → Package → File → Type → Field/Method.
//! Every name-indexed collection is a [`NamedList`], so lookups can never
//! drift from the ordered slices they index.

pub mod file;
pub mod function;
pub mod identity;
pub mod named_list;
pub mod package;
pub mod project;
pub mod span;
pub mod types;

pub use file::{Asset, Binding, Constant, File, Import, Variable};
pub use function::{Function, Parameter};
pub use identity::{Identity, IdentityKind};
pub use named_list::{ItemMut, Named, NamedList, Rename};
pub use package::Package;
pub use project::Project;
pub use span::{Comment, Span};
pub use types::{base_type_name, Field, ImplBlock, Type, TypeKind, TypeParam, TypeRef};
