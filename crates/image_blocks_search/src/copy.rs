use image_blocks_storage::{ensure_same_shape, prelude::*, Result};

use tracing::{debug, debug_span};

/// Copies every element of `src` into `dst`, which must have the same shape but may use a different backend.
///
/// Both images are traversed in lock-step by sequential cursors, so each element is read once and written once. A failure
/// part way through leaves `dst` partially written.
pub fn copy_img<T, const D: usize>(src: &Img<T, D>, dst: &mut Img<T, D>) -> Result<()>
where
    T: Element,
{
    ensure_same_shape(src.shape(), dst.shape())?;

    let span = debug_span!("copy_img", shape = ?src.shape());
    let _enter = span.enter();

    let mut read = src.cursor();
    let mut write = dst.cursor_mut();
    let mut num_copied = 0;
    while read.has_next() {
        read.advance()?;
        write.advance()?;
        write.set_value(read.value()?.clone())?;
        num_copied += 1;
    }
    debug!(num_copied, "copied image");

    Ok(())
}

/// Creates an image of the same shape as `src`, stored by the `kind` backend, and copies `src` into it.
pub fn duplicate<T, const D: usize>(src: &Img<T, D>, kind: BackendKind) -> Result<Img<T, D>>
where
    T: Element,
{
    let mut dst = Img::new(src.shape(), kind)?;
    copy_img(src, &mut dst)?;

    Ok(dst)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
