use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading catalog and similarity matrix...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let size = index.similarity().size();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", index.len());
    println!("Matrix: {}x{}", size, size);
    println!("\nPerformance: {:.0} scores/second",
             (size * size) as f64 / elapsed.as_secs_f64());
}
