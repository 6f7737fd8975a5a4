use cellgrid::functions;

const CITY_WKT: &str = "POLYGON((34.75 32.05, 34.85 32.05, 34.85 32.15, 34.75 32.15, 34.75 32.05))";

fn main() {
    colog::init();
    println!("Starting batch tagging run...");

    let cover = functions::polygon_cover_tokens(CITY_WKT, 8, 14)
        .expect("valid polygon")
        .expect("non-empty polygon");
    println!("Covering has {} cells", cover.len());

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(7);

    let count = 1_000_000;
    let start = std::time::Instant::now();
    let mut inside = 0usize;
    for _ in 0..count {
        let lat = rng.gen_range(31.9..32.3);
        let lng = rng.gen_range(34.6..35.0);
        let token = functions::leaf_cell_token(lat, lng);
        if functions::within_cells(&token, &cover) == Some(true) {
            inside += 1;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "Tagged {} points in {:?}, {} inside the covering",
        count, elapsed, inside
    );
}
