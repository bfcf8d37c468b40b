//! App Router

use salvo::Router;

use crate::{auth, carts, frames, orders, principals, variants};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("frames")
                .get(frames::index::handler)
                .post(frames::create::handler)
                .push(
                    Router::with_path("{frame}")
                        .get(frames::get::handler)
                        .put(frames::update::handler)
                        .delete(frames::delete::handler)
                        .push(
                            Router::with_path("variants")
                                .post(variants::create::handler)
                                .push(Router::with_path("{kind}").get(variants::index::handler)),
                        ),
                ),
        )
        .push(
            Router::with_path("variants/{kind}/{variant}")
                .put(variants::update::handler)
                .delete(variants::delete::handler),
        )
        .push(Router::with_path("register").post(principals::register::handler))
        .push(Router::with_path("me").get(principals::me::handler))
        .push(
            Router::with_path("users")
                .get(principals::index::handler)
                .push(
                    Router::with_path("{principal}")
                        .put(principals::update::handler)
                        .delete(principals::delete::handler),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("uploads")
                .push(Router::with_path("original").post(carts::uploads::original))
                .push(Router::with_path("cropped").post(carts::uploads::cropped)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
}
