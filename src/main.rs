//! # Voxel Sandbox Entry Point
//!
//! Calls into the library's `run()` function, which simulates the sandbox headless.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- config.json
//! ```

fn main() {
    voxel_sandbox::run();
}
