//! Warning collection for card building.
//!
//! Problems found while shaping a product (no usable image, missing name,
//! image host outside the allow list) do not stop the card from being built.
//! They are gathered in a task-local list so each arranged card can carry its
//! own warnings.

use std::cell::RefCell;

use tracing::debug;

tokio::task_local! {
    static WARNINGS: RefCell<Vec<String>>;
}

/// Records a problem with the product whose card is being built. Outside a
/// card scope the message only reaches the log.
pub fn collect(message: impl Into<String>) {
    let message = message.into();
    debug!(%message, "product warning");
    let _ = WARNINGS.try_with(|warnings| warnings.borrow_mut().push(message));
}

/// Builds one card inside its own warning scope and hands back the card
/// together with everything reported while building it.
pub async fn collect_warnings<F, T>(build: F) -> (T, Vec<String>)
where
    F: std::future::Future<Output = T>,
{
    WARNINGS
        .scope(RefCell::new(Vec::new()), async {
            let card = build.await;
            let reported = WARNINGS.with(RefCell::take);
            (card, reported)
        })
        .await
}

/// `format!`-style shorthand for [`collect`].
#[macro_export]
macro_rules! warn_product {
    ($($arg:tt)*) => {
        $crate::warning::collect(format!($($arg)*))
    };
}
