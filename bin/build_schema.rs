//! Binary for generating contract schemas from odra modules.
#![doc = "Binary for generating contract schemas from odra modules."]

#[allow(unused_imports)]
use lending_pool_contracts;

fn main() {
    // Schemas for the contracts listed in Odra.toml are emitted by odra-build
}
