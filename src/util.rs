// Browser helpers. Console output only exists on wasm; native test builds stay silent.

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::log!(msg);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::warn!(msg);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/// Monotonic milliseconds (`performance.now()`), falling back to `Date.now()`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn random() -> f64 {
    js_sys::Math::random()
}
