pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod videogames;

pub use routes::create_router;
