//! Writes synthetic instrument files for trying out the viewer.
//!
//! Usage: `generate_sample [OUT_DIR]` (defaults to `samples/`).

use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct NoiseSource {
    s: [u64; 4],
}

impl NoiseSource {
    fn seeded(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *slot = x;
        }
        NoiseSource { s }
    }

    fn next_u64(&mut self) -> u64 {
        let out = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        out
    }

    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean normal sample (Box-Muller).
    fn normal(&mut self, sigma: f64) -> f64 {
        let u1 = self.uniform().max(1e-15);
        let u2 = self.uniform();
        sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

fn bump(x: f64, center: f64, width: f64, height: f64) -> f64 {
    height * (-(x - center).powi(2) / (2.0 * width * width)).exp()
}

// ---------------------------------------------------------------------------
// Cyclic voltammogram: generic CSV
// ---------------------------------------------------------------------------

fn write_cv_csv(path: &Path, rng: &mut NoiseSource) -> Result<usize> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["Ewe/V", "<I>/mA", "cycle number"])?;

    let step = 0.005;
    let n_half = 200;
    let mut rows = 0;
    for cycle in 1..=2 {
        let fade = 1.0 - 0.05 * (cycle - 1) as f64;
        for i in 0..2 * n_half {
            let forward = i < n_half;
            let k = if forward { i } else { 2 * n_half - i };
            let e = -0.5 + step * k as f64;
            let (charging, faradaic) = if forward {
                (0.02, bump(e, 0.22, 0.05, 0.8 * fade))
            } else {
                (-0.02, -bump(e, 0.16, 0.05, 0.7 * fade))
            };
            let current = charging + faradaic + rng.normal(0.004);
            w.write_record([format!("{e:.4}"), format!("{current:.6}"), cycle.to_string()])?;
            rows += 1;
        }
    }
    w.flush()?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Impedance spectrum: Gamry DTA (Randles cell)
// ---------------------------------------------------------------------------

fn write_eis_dta(path: &Path, rng: &mut NoiseSource) -> Result<usize> {
    let (rs, rct, cdl) = (12.0_f64, 150.0_f64, 20e-6_f64);
    let points_per_decade = 10;
    let decades = 6;
    let n = points_per_decade * decades + 1;

    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "EXPLAIN")?;
    writeln!(w, "TAG\tEISPOT")?;
    writeln!(w, "TITLE\tLABEL\tPotentiostatic EIS\tTest &Identifier")?;
    writeln!(w, "FREQINIT\tQUANT\t100000\tInitial Freq. (Hz)")?;
    writeln!(w, "FREQFINAL\tQUANT\t0.1\tFinal Freq. (Hz)")?;
    writeln!(w, "PTSPERDEC\tIQUANT\t{points_per_decade}\tPoints/decade")?;
    writeln!(w, "VAC\tQUANT\t10\tAC Voltage (mV rms)")?;
    writeln!(w, "AREA\tQUANT\t1\tSample Area (cm^2)")?;
    writeln!(w, "ZCURVE\tTABLE\t{n}")?;
    writeln!(w, "\tPt\tTime\tFreq\tZreal\tZimag\tZsig\tZmod\tZphz")?;
    writeln!(w, "\t#\ts\tHz\tohm\tohm\tV\tohm\t°")?;

    for i in 0..n {
        let freq = 1e5 * 10f64.powf(-(i as f64) / points_per_decade as f64);
        let omega = 2.0 * PI * freq;
        // Z = Rs + Rct / (1 + j ω Rct Cdl)
        let wrc = omega * rct * cdl;
        let denom = 1.0 + wrc * wrc;
        let noise = 1.0 + rng.normal(0.005);
        let zre = (rs + rct / denom) * noise;
        let zim = (-rct * wrc / denom) * noise;
        let zmod = zre.hypot(zim);
        let zphz = zim.atan2(zre).to_degrees();
        writeln!(
            w,
            "\t{i}\t{:.2}\t{freq:.4E}\t{zre:.4E}\t{zim:.4E}\t1\t{zmod:.4E}\t{zphz:.3}",
            i as f64 * 2.5
        )?;
    }
    w.flush()?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Battery cycling summary: generic CSV
// ---------------------------------------------------------------------------

fn write_battery_csv(path: &Path, rng: &mut NoiseSource) -> Result<usize> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["Cycle", "Discharge Capacity (mAh/g)", "Coulombic Efficiency (%)"])?;
    let cycles = 100;
    for cycle in 1..=cycles {
        let capacity = 180.0 * (-0.002 * cycle as f64).exp() + rng.normal(0.4);
        let efficiency = (99.2 + rng.normal(0.15)).min(100.0);
        w.write_record([cycle.to_string(), format!("{capacity:.3}"), format!("{efficiency:.2}")])?;
    }
    w.flush()?;
    Ok(cycles)
}

// ---------------------------------------------------------------------------
// Potential step: generic CSV with comment metadata
// ---------------------------------------------------------------------------

fn write_ca_csv(path: &Path, rng: &mut NoiseSource) -> Result<usize> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "# technique: chronoamperometry")?;
    writeln!(w, "# step potential: 0.6")?;
    writeln!(w, "Time (s),Current (A)")?;
    let n = 300;
    for i in 1..=n {
        let t = i as f64 * 0.1;
        // Cottrell decay on top of a small steady-state current.
        let current = 2.5e-5 / t.sqrt() + 1e-6 + rng.normal(2e-8);
        writeln!(w, "{t:.1},{current:.6e}")?;
    }
    w.flush()?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// CV on an EC-Lab export: BioLogic MPT with decimal commas
// ---------------------------------------------------------------------------

fn write_biologic_mpt(path: &Path, rng: &mut NoiseSource) -> Result<usize> {
    let header = [
        "EC-Lab ASCII FILE",
        "Nb header lines : 7",
        "",
        "Cyclic Voltammetry",
        "Electrode material : glassy carbon",
        "Electrolyte : 0.1 M KCl",
    ];
    let mut w = BufWriter::new(File::create(path)?);
    for line in header {
        writeln!(w, "{line}")?;
    }
    writeln!(w, "mode\ttime/s\tEwe/V\t<I>/mA\tcycle number")?;

    let scan_rate = 0.05;
    let step = 0.004;
    let n_half = 250;
    for i in 0..2 * n_half {
        let forward = i < n_half;
        let k = if forward { i } else { 2 * n_half - i };
        let e = -0.2 + step * k as f64;
        let faradaic = if forward {
            bump(e, 0.45, 0.04, 0.35)
        } else {
            -bump(e, 0.38, 0.04, 0.3)
        };
        let current = faradaic + if forward { 0.01 } else { -0.01 } + rng.normal(0.002);
        let t = i as f64 * step / scan_rate;
        let line = format!("2\t{t:.3}\t{e:.4}\t{current:.5}\t1").replace('.', ",");
        writeln!(w, "{line}")?;
    }
    w.flush()?;
    Ok(2 * n_half)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("samples"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = NoiseSource::seeded(42);
    let writers: [(&str, fn(&Path, &mut NoiseSource) -> Result<usize>); 5] = [
        ("cv_sample.csv", write_cv_csv),
        ("eis_sample.DTA", write_eis_dta),
        ("battery_sample.csv", write_battery_csv),
        ("ca_sample.csv", write_ca_csv),
        ("cv_biologic.mpt", write_biologic_mpt),
    ];

    for (name, write) in writers {
        let path = out_dir.join(name);
        let rows = write(&path, &mut rng).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {rows} rows to {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}
