//! Generate a deterministic sample listings CSV for trying out the
//! dashboard:
//!
//! ```sh
//! cargo run --bin generate_sample -- sample_listings.csv
//! ```
//!
//! Prices come out in the messy shapes real exports have: plain numbers,
//! `$`-prefixed values, ranges, and the occasional unparseable entry.

use std::error::Error;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const BRANDS: &[(&str, f64)] = &[
    ("Dell", 250.0),
    ("HP", 280.0),
    ("Lenovo", 300.0),
    ("Acer", 200.0),
    ("ASUS", 450.0),
    ("MSI", 1100.0),
    ("Panasonic", 950.0),
    ("Apple", 800.0),
    ("Toshiba", 180.0),
    ("Gateway", 160.0),
];

const TYPES: &[&str] = &["Laptop", "Desktop", "Tablet", "All-in-One"];

const CONDITIONS: &[(&str, f64)] = &[
    ("New", 1.4),
    ("Certified", 1.3),
    ("Excellent", 1.15),
    ("Very Good", 1.0),
    ("Good", 0.85),
    ("Used", 0.7),
    ("For Parts", 0.25),
];

fn main() -> Result<(), Box<dyn Error>> {
    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_listings.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&out_path)?;
    writer.write_record(["Brand", "Type", "Condition", "Price", "Seller Rating"])?;

    for _ in 0..200 {
        let &(brand, base_price) = rng.pick(BRANDS);
        let kind = *rng.pick(TYPES);
        let &(condition, factor) = rng.pick(CONDITIONS);

        let price = base_price * factor * (0.75 + 0.5 * rng.next_f64());
        let price_text = match rng.next_u64() % 10 {
            // Mostly clean, some ranges, a little junk.
            0..=4 => format!("${price:.2}"),
            5 | 6 => format!("{price:.2}"),
            7 | 8 => {
                let spread = price * (0.1 + 0.2 * rng.next_f64());
                format!("${:.0}-${:.0}", price - spread, price + spread)
            }
            _ => (*rng.pick(&["free", "call for price", "-50", "100-200-300"])).to_string(),
        };

        let rating = format!("{:.1}", 3.0 + 2.0 * rng.next_f64());
        writer.write_record([brand, kind, condition, price_text.as_str(), rating.as_str()])?;
    }

    writer.flush()?;
    println!("Wrote 200 listings to {out_path}");
    Ok(())
}
