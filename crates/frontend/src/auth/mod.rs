pub mod context;
pub mod error_handler;
pub mod guard;

pub use context::{
    AuthAction, AuthContext, AuthContextData, AuthProvider, use_auth, use_current_user,
};
pub use guard::{PageProps, WithAuth};
