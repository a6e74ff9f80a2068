pub mod cat;
pub mod history;
pub mod overview;
pub mod show;
pub mod tree;
pub mod working;

pub use cat::*;
pub use history::*;
pub use overview::*;
pub use show::*;
pub use tree::*;
pub use working::*;
