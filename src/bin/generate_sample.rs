use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Lorentzian resonance, peak `depth` at `f0`, half width `gamma`.
fn resonance(f: f64, f0: f64, gamma: f64, depth: f64) -> f64 {
    depth * gamma.powi(2) / ((f - f0).powi(2) + gamma.powi(2))
}

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

    /// Uniform noise in `[-amplitude, amplitude)`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

struct Antenna {
    index: u32,
    /// (centre GHz, half width GHz, peak efficiency)
    resonances: &'static [(f64, f64, f64)],
    complex: bool,
}

const ANTENNAS: &[Antenna] = &[
    Antenna {
        index: 1,
        resonances: &[(0.85, 0.08, 0.45), (1.9, 0.25, 0.55), (3.5, 0.4, 0.6)],
        complex: false,
    },
    Antenna {
        index: 2,
        resonances: &[(1.57, 0.05, 0.5), (2.45, 0.12, 0.65)],
        complex: true,
    },
    Antenna {
        index: 3,
        resonances: &[(5.5, 0.6, 0.7)],
        complex: false,
    },
];

fn record_group(tree_path: &str, file: &str, result: &str) -> String {
    format!(
        "type=s:XYSIGNAL2\nsubtype=s:linear\nproblemclass=s:High Frequency\n\
         visibility=s:visible\ncreation=s:internal\nlifetime=s:rebuild\n\
         result=s:{result}\nparametric=s:P\ntreepath=s:{tree_path}\nfiles=s:{file}\n"
    )
}

fn signal_file(antenna: &Antenna, freqs: &[f64], rng: &mut SimpleRng) -> String {
    let mut out = String::from("// Frequency / GHz\n// Efficiency\n// generated sample\n// ---\n");
    for &f in freqs {
        let eff: f64 = 0.05
            + antenna
                .resonances
                .iter()
                .map(|&(f0, gamma, depth)| resonance(f, f0, gamma, depth))
                .sum::<f64>();
        let eff = (eff + rng.jitter(0.005)).clamp(0.0, 1.0);
        if antenna.complex {
            let _ = writeln!(out, "{f:.4} {eff:.6} {:.6}", rng.jitter(0.01));
        } else {
            let _ = writeln!(out, "{f:.4} {eff:.6}");
        }
    }
    out
}

fn write_project(root: &Path) -> Result<PathBuf> {
    let result_dir = root.join("demo").join("Result");
    std::fs::create_dir_all(&result_dir).context("creating result directory")?;
    let project_file = root.join("demo.cst");
    std::fs::write(&project_file, b"").context("writing project file")?;

    let mut rng = SimpleRng::new(42);
    // 0.5 → 6.0 GHz, step 10 MHz
    let freqs: Vec<f64> = (0..=550).map(|i| 0.5 + i as f64 * 0.01).collect();

    let mut groups = Vec::new();
    for antenna in ANTENNAS {
        let name = format!("System Tot. Efficiency [AC{}]", antenna.index);
        let file = format!("{name}.sig");
        std::fs::write(result_dir.join(&file), signal_file(antenna, &freqs, &mut rng))
            .with_context(|| format!("writing {file}"))?;
        let kind = if antenna.complex { "complex" } else { "real" };
        groups.push(record_group(
            &format!("1D Results\\Efficiencies\\{name}"),
            &file,
            kind,
        ));
    }
    // A curve the efficiency filter must skip.
    std::fs::write(
        result_dir.join("S1,1.sig"),
        signal_file(&ANTENNAS[0], &freqs, &mut rng),
    )
    .context("writing S1,1.sig")?;
    groups.push(record_group("1D Results\\S-Parameters\\S1,1", "S1,1.sig", "complex"));

    let mut res = format!("[Version]=s:1\nNumberOfResults=i:{}\n\n", groups.len());
    for group in &groups {
        res.push_str(group);
        res.push('\n');
    }
    std::fs::write(result_dir.join("Model.res"), res).context("writing Model.res")?;

    Ok(project_file)
}

fn main() -> Result<()> {
    let root = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let project = write_project(&root)?;

    println!(
        "Wrote sample project with {} antennas to {}",
        ANTENNAS.len(),
        project.display()
    );
    Ok(())
}
