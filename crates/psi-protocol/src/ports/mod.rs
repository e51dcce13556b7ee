//! Ports: capability traits implemented by every protocol variant

pub mod inbound;

pub use inbound::{PsiClientApi, PsiProtocol, PsiServerApi};
