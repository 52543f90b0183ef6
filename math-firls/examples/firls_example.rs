//! Example demonstrating least-squares FIR design
//!
//! Run with `RUST_LOG=debug` to see the rank of each solve.

use math_audio_firls::*;

fn print_response(taps: &[f64], fs: f64, probes: &[f64]) {
    let response = match freqz(2049, taps, fs) {
        Ok(r) => r,
        Err(e) => {
            println!("   freqz failed: {}", e);
            return;
        }
    };
    let db = response.magnitudes_db();
    for &f in probes {
        let idx = response
            .frequencies
            .iter()
            .position(|&x| x >= f)
            .unwrap_or(response.len() - 1);
        println!("   Response at {:>7.0} Hz: {:8.2} dB", f, db[idx]);
    }
}

fn main() {
    env_logger::init();

    println!("Least-squares FIR Design Example");
    println!("================================\n");

    // Example 1: Lowpass with a heavier stopband weight
    println!("1. Lowpass (pass 0-4 kHz, stop 6-24 kHz, stopband weight 10):");
    match firls(
        101,
        &[0.0, 4000.0, 6000.0, 24000.0],
        &[1.0, 0.0],
        &[1.0, 0.0],
        &[1.0, 10.0],
        48000.0,
    ) {
        Ok(taps) => {
            println!("   Number of taps: {}", taps.len());
            print_response(&taps, 48000.0, &[0.0, 2000.0, 4000.0, 5000.0, 6000.0, 12000.0]);
        }
        Err(e) => println!("   Design failed: {} (code {})", e, e.code() as i32),
    }

    // Example 2: Even length differentiator-like ramp
    println!("\n2. Type II ramp (gain rising 0 to 1 over 0-8 kHz):");
    let spec = FilterSpec::new(32, 48000.0)
        .with_band(Band::linear(0.0, 8000.0, 0.0, 1.0))
        .with_band(Band::constant(10000.0, 24000.0, 0.0));
    match spec.design() {
        Ok(taps) => print_response(&taps, 48000.0, &[1000.0, 4000.0, 8000.0, 16000.0]),
        Err(e) => println!("   Design failed: {}", e),
    }
    if let Ok(json) = spec.to_json() {
        println!("   As JSON:\n{}", json);
    }

    // Example 3: Numerically rank-deficient design
    println!("\n3. Long filter with wide transition (rank deficient):");
    match firls(201, &[0.0, 100.0, 400.0, 500.0], &[1.0, 0.0], &[1.0, 0.0], &[1.0, 1.0], 1000.0) {
        Ok(taps) => print_response(&taps, 1000.0, &[0.0, 50.0, 250.0, 450.0]),
        Err(e) => println!("   Design failed: {}", e),
    }

    // Example 4: Error reporting
    println!("\n4. Invalid design:");
    let err = firls(11, &[0.3, 0.2], &[1.0], &[1.0], &[1.0], 2.0).unwrap_err();
    println!("   {}", err);
    println!("   Code {}: {}", err.code() as i32, describe_error(err.code() as i32));
}
