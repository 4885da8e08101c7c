use std::f64::consts::PI;
use std::sync::Arc;

use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// 2024-01-01T00:00:00Z
const START_EPOCH: f64 = 1_704_067_200.0;
const SAMPLE_INTERVAL_S: f64 = 300.0;
const DAYS: usize = 14;

/// SplitMix64 stream; reproducible across runs and platforms.
struct Noise(u64);

impl Noise {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Approximately normal jitter: twelve uniforms summed have variance 1.
    fn jitter(&mut self, sigma: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.unit()).sum();
        sigma * (sum - 6.0)
    }
}

fn main() {
    let mut noise = Noise(0x5EED_BE28_0000_0001);

    let n = DAYS * (86_400.0 / SAMPLE_INTERVAL_S) as usize;
    let mut timestamp = Vec::with_capacity(n);
    let mut temperature = Vec::with_capacity(n);
    let mut humidity = Vec::with_capacity(n);
    let mut pressure = Vec::with_capacity(n);

    // Slow pressure drift, random walk.
    let mut p = 1013.0;

    for i in 0..n {
        let t = START_EPOCH + i as f64 * SAMPLE_INTERVAL_S;
        // Daily cycle peaking mid-afternoon.
        let phase = 2.0 * PI * ((t / 86_400.0).fract() - 0.625);
        let temp = 18.0 + 5.0 * phase.cos() + noise.jitter(0.2);
        // Humidity moves against temperature.
        let hum = (55.0 - 12.0 * phase.cos() + noise.jitter(1.0)).clamp(0.0, 100.0);
        p = (p + noise.jitter(0.05)).clamp(990.0, 1035.0);

        timestamp.push(t);
        temperature.push(temp);
        humidity.push(hum);
        pressure.push(p);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("humidity", DataType::Float64, false),
        Field::new("pressure", DataType::Float64, false),
        Field::new("temperature", DataType::Float64, false),
        Field::new("timestamp", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(humidity)),
            Arc::new(Float64Array::from(pressure)),
            Arc::new(Float64Array::from(temperature)),
            Arc::new(Float64Array::from(timestamp)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_weather.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n} readings ({DAYS} days, every {SAMPLE_INTERVAL_S} s) to {output_path}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_reproducible_and_centred() {
        let mut a = Noise(7);
        let mut b = Noise(7);
        let xs: Vec<f64> = (0..2000).map(|_| a.jitter(1.0)).collect();
        let ys: Vec<f64> = (0..2000).map(|_| b.jitter(1.0)).collect();
        assert_eq!(xs, ys);

        assert!(xs.iter().all(|x| x.abs() <= 6.0));
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }
}
