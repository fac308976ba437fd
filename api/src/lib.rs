mod auth;
mod cats;
mod config;
mod context;
mod invoker;
mod publish;
mod slideshows;
pub mod tags;

pub use auth::AuthResponse;
pub use cats::{Cat, CatCreate, CatListParams, CatUpdate};
pub use config::ApiConfig;
pub use context::{AppContext, CATS, SLIDESHOWS};
pub use invoker::{BoxFuture, RemoteInvoker, RemoteRequest};
pub use slideshows::{
    Slideshow, SlideshowCreate, SlideshowListParams, SlideshowUpdate, SlideshowsByCatParams,
    SlideshowsSearchParams,
};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Params(#[from] query::ParamsError),

    #[error(transparent)]
    Op(#[from] error::OpError),
}
