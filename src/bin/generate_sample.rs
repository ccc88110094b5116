use anyhow::{Context, Result};

use carload::data::model::columns;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct BaseCar {
    model: &'static str,
    make: &'static str,
    price: f64,
    zero_to_sixty: f64,
    horsepower: f64,
}

const LINEUP: &[BaseCar] = &[
    BaseCar { model: "Model S Plaid", make: "Tesla", price: 108_490.0, zero_to_sixty: 2.1, horsepower: 1020.0 },
    BaseCar { model: "Roadster", make: "Tesla", price: 200_000.0, zero_to_sixty: 1.9, horsepower: 1000.0 },
    BaseCar { model: "Mustang GT", make: "Ford", price: 55_300.0, zero_to_sixty: 4.2, horsepower: 450.0 },
    BaseCar { model: "GT", make: "Ford", price: 500_000.0, zero_to_sixty: 3.0, horsepower: 660.0 },
    BaseCar { model: "911 Turbo S", make: "Porsche", price: 207_000.0, zero_to_sixty: 2.6, horsepower: 640.0 },
    BaseCar { model: "718 Cayman GT4", make: "Porsche", price: 101_200.0, zero_to_sixty: 4.2, horsepower: 414.0 },
    BaseCar { model: "488 Pista", make: "Ferrari", price: 330_000.0, zero_to_sixty: 2.8, horsepower: 710.0 },
    BaseCar { model: "F8 Tributo", make: "Ferrari", price: 276_000.0, zero_to_sixty: 2.9, horsepower: 710.0 },
    BaseCar { model: "Huracan Evo", make: "Lamborghini", price: 261_000.0, zero_to_sixty: 2.9, horsepower: 630.0 },
    BaseCar { model: "Aventador SVJ", make: "Lamborghini", price: 517_000.0, zero_to_sixty: 2.8, horsepower: 770.0 },
    BaseCar { model: "Corvette Z06", make: "Chevrolet", price: 106_000.0, zero_to_sixty: 2.6, horsepower: 670.0 },
    BaseCar { model: "720S", make: "McLaren", price: 299_000.0, zero_to_sixty: 2.8, horsepower: 710.0 },
    BaseCar { model: "R8 V10", make: "Audi", price: 142_700.0, zero_to_sixty: 3.4, horsepower: 562.0 },
    BaseCar { model: "GT-R Nismo", make: "Nissan", price: 210_700.0, zero_to_sixty: 2.9, horsepower: 600.0 },
    BaseCar { model: "M4 Competition", make: "BMW", price: 74_700.0, zero_to_sixty: 3.8, horsepower: 503.0 },
];

/// Format a dollar amount with grouping commas, `79990` → `"79,990"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sport_car_listings.csv";
    let mut writer =
        csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        columns::MODEL,
        columns::MAKE,
        columns::PRICE,
        columns::ACCELERATION,
        columns::HORSEPOWER,
        "Year",
    ])?;

    // One to three model-year rows per car; repeated model names exercise
    // the first-one-wins dedup downstream.
    let mut rows: usize = 0;
    for car in LINEUP {
        let variants = 1 + (rng.next_u64() % 3) as usize;
        for i in 0..variants {
            let year = 2020 + i;
            let price = (car.price * (1.0 + rng.gauss(0.0, 0.03))).max(10_000.0);
            let zero_to_sixty = (car.zero_to_sixty + rng.gauss(0.0, 0.05)).max(1.5);
            let horsepower = (car.horsepower + rng.gauss(0.0, 8.0)).max(100.0);

            writer.write_record(&[
                car.model.to_string(),
                car.make.to_string(),
                group_thousands(price.round() as u64),
                format!("{zero_to_sixty:.1}"),
                format!("{horsepower:.0}"),
                year.to_string(),
            ])?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} listing row(s) to {output_path}");
    Ok(())
}
