//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use lending_pool_contracts;

fn main() {
    // Compilation of the pool, oracle and token modules is driven by odra-build
}
