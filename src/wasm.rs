//! Browser-only setup. A panic in a wasm build otherwise ends in a bare `unreachable` trap with no
//! message; the hook forwards the panic text to the developer console.

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}
