mod github_sync;

pub use github_sync::GithubSync;
