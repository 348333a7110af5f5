pub mod convert;
pub mod hash;
pub mod kinds;
pub mod new;
pub mod show;
