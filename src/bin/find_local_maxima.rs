use image_blocks::prelude::*;
use image_blocks::search::{find_and_mark_local_maxima, find_local_maxima};

/// Finds the local maxima of a synthetic 2D landscape and draws them.
///
/// Usage: `find_local_maxima [SIZE] [CHUNK_SIZE]`. Without a chunk size the image is stored contiguously.
fn main() {
    let args: Vec<_> = std::env::args().collect();
    let size: i32 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(24);
    let factory = match args.get(2).and_then(|a| a.parse().ok()) {
        Some(chunk_size) => ImgFactory::chunked(chunk_size),
        None => ImgFactory::contiguous(),
    };

    if let Err(e) = run(&factory, size) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(factory: &ImgFactory, size: i32) -> Result<(), ImgError> {
    println!("Building a {0}x{0} landscape with {1:?}", size, factory.backend);

    let landscape = build_landscape(factory, size)?;

    let maxima = find_local_maxima(&landscape)?;
    println!("Found {} local maxima: {:?}\n", maxima.len(), maxima);

    let marked = find_and_mark_local_maxima(&landscape, true)?;
    let mut line = String::new();
    marked.for_each_position(|p, is_marked| {
        line.push(if *is_marked { '#' } else { '.' });
        if p.at(1) + 1 == size {
            println!("{}", line);
            line.clear();
        }
    });

    Ok(())
}

/// A sum of a few cone-shaped hills, so that the maxima are the hill tops.
fn build_landscape(factory: &ImgFactory, size: i32) -> Result<Img<i32, 2>, ImgError> {
    let hills = [
        (PointN([size / 4, size / 3]), size),
        (PointN([size / 2, 3 * size / 4]), 2 * size / 3),
        (PointN([3 * size / 4, size / 5]), size / 2),
    ];

    let mut img = factory.build(PointN([size, size]))?;
    let mut cursor = img.cursor_mut();
    while cursor.has_next() {
        cursor.advance()?;
        let p = cursor.position()?;
        let height = hills
            .iter()
            .map(|(top, height)| (height - 2 * p.chebyshev_distance(top)).max(0))
            .sum();
        cursor.set_value(height)?;
    }

    Ok(img)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
