//! Generate a deterministic sample movie CSV at the fallback location
//! (`data/movies_2024_detailed.csv`) for running the dashboard without a
//! database. The output deliberately carries the messiness the normalizer
//! has to handle: K/M vote suffixes, comma grouping, "N/A" ratings, and
//! partial "Xh Ym" durations.

use std::error::Error;

const OUTPUT: &str = "data/movies_2024_detailed.csv";
const N_MOVIES: usize = 250;

const GENRES: &[&str] = &[
    "Action",
    "Action, Adventure",
    "Comedy",
    "Comedy, Romance",
    "Drama",
    "Drama/Thriller",
    "Horror",
    "Sci-Fi",
    "Sci-Fi/Fantasy",
    "Documentary",
];

const TITLE_HEADS: &[&str] = &[
    "Midnight", "Crimson", "Silent", "Broken", "Golden", "Last", "Hidden", "Electric", "Paper",
    "Iron",
];
const TITLE_TAILS: &[&str] = &[
    "Horizon", "Protocol", "Garden", "Empire", "Signal", "Harvest", "Covenant", "Mirage",
    "Frontier", "Reckoning",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T: ?Sized>(&mut self, items: &'a [&'a T]) -> &'a T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

fn rating_text(rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 10 {
        // Roughly one in ten ratings is missing, split between the two
        // missing spellings the scraper produces.
        0 if rng.next_f64() < 0.5 => "N/A".to_string(),
        0 => String::new(),
        _ => format!("{:.1}", 3.0 + rng.next_f64() * 6.5),
    }
}

fn votes_text(rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 5 {
        0 => format!("{:.1}K", 1.0 + rng.next_f64() * 900.0),
        1 => format!("{:.1}M", rng.next_f64() * 2.5),
        2 => {
            // Comma-grouped plain count.
            let n = rng.range(1_000, 900_000);
            let thousands = n / 1_000;
            format!("{},{:03}", thousands, n % 1_000)
        }
        3 => rng.range(10, 999).to_string(),
        _ => match rng.next_u64() % 8 {
            0 => "N/A".to_string(),
            _ => rng.range(1_000, 50_000).to_string(),
        },
    }
}

fn duration_text(rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 10 {
        0 => String::new(),
        1 => format!("{}m", rng.range(40, 110)),
        2 => format!("{}h", rng.range(1, 4)),
        _ => format!("{}h {}m", rng.range(1, 4), rng.range(0, 60)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data")?;
    let mut writer = csv::Writer::from_path(OUTPUT)?;
    writer.write_record(["title", "genre", "rating", "votes", "duration"])?;

    for i in 0..N_MOVIES {
        let title = format!(
            "{} {} {}",
            rng.pick(TITLE_HEADS),
            rng.pick(TITLE_TAILS),
            i + 1
        );
        writer.write_record([
            title,
            rng.pick(GENRES).to_string(),
            rating_text(&mut rng),
            votes_text(&mut rng),
            duration_text(&mut rng),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {N_MOVIES} movies to {OUTPUT}");
    Ok(())
}
