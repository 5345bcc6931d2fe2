use image_blocks_storage::prelude::*;

use std::fmt::Display;

/// Escapes the capturing of output from tests so it's visible even when the test succeeds.
pub fn test_print(message: &str) {
    use std::io::Write;

    std::io::stdout()
        .lock()
        .write_all(message.as_bytes())
        .unwrap();
}

/// Renders a 2D image as rows of space-separated values, one line per value of axis 0.
pub fn format_img2<T: Element + Display>(img: &Img<T, 2>) -> String {
    let mut out = String::new();
    for (p, value) in img.cursor() {
        out.push_str(&value.to_string());
        out.push(if p.at(1) + 1 == img.shape().at(1) { '\n' } else { ' ' });
    }

    out
}
