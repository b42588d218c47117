// ABOUTME: Metabolic cart CSV fixtures for integration tests
// ABOUTME: Builds exports with a units row and steady half-minute samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

/// Header row as exported by the cart
pub const HEADER: &str = "Time,VO2,VO2/kg,VCO2,VCO2/kg,RER";

/// Units row as exported by the cart
pub const UNITS: &str = ",ml/min,ml/kg/min,ml/min,ml/kg/min,";

/// Three-sample export: VO2 250/260/270, VCO2 200/210/220
pub fn three_samples() -> String {
    format!(
        "{HEADER}\n{UNITS}\n\
         0:30,250,3.1,200,2.5,0.80\n\
         1:00,260,3.3,210,2.6,0.81\n\
         1:30,270,3.4,220,2.8,0.81\n"
    )
}

/// One sample every 30 seconds for `minutes`, VO2 alternating 245/255
pub fn steady_state(minutes: u32) -> String {
    let mut csv = format!("{HEADER}\n{UNITS}\n");
    for i in 0..minutes * 2 {
        let vo2 = if i % 2 == 0 { 245.0 } else { 255.0 };
        let vco2 = vo2 * 0.82;
        let _ = writeln!(
            csv,
            "{}:{:02},{vo2},{:.2},{vco2:.1},{:.2},{:.3}",
            i / 2,
            (i % 2) * 30,
            vo2 / 80.0,
            vco2 / 80.0,
            vco2 / vo2
        );
    }
    csv
}
