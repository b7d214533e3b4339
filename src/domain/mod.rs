pub mod job;
pub mod page;
pub mod provider;
pub mod run;
pub mod scenario;

pub use job::*;
pub use page::*;
pub use provider::*;
pub use run::*;
pub use scenario::*;
