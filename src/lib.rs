use worker::*;

pub mod config;
pub mod engagement;
pub mod error;
mod handlers;
pub mod scraper;
mod utils;

#[event(start)]
fn start() {
    console_error_panic_hook::set_once();
    utils::logger::init_worker_logger();
}

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    build_router().run(req, env).await
}

fn build_router() -> Router<'static, ()> {
    Router::new()
        .post_async("/", |req, ctx| async move {
            handlers::engagement::handle(req, ctx).await
        })
        .options("/", handlers::preflight::handle)
        .or_else_any_method("/", handlers::preflight::method_not_allowed)
}
