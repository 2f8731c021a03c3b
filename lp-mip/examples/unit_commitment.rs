//! Unit commitment example.
//!
//! Schedules three generating units over four periods to meet demand at
//! minimum cost. Each unit has a generation window [min_gen, max_gen]
//! that applies while committed, a ramp limit between consecutive
//! periods, a fixed running cost per committed period, a variable cost
//! per MWh, and a startup cost when it switches on.
//!
//! Input records are plain attribute structs keyed by unit name, the way
//! a tabular data source would supply them.

use lp_core::{LinExpr, Model, Sense};
use lp_mip::{solve, MipSettings};

struct UnitRecord {
    name: &'static str,
    min_gen: f64,
    max_gen: f64,
    ramp: f64,
    fixed_cost: f64,
    variable_cost: f64,
    startup_cost: f64,
    initially_on: bool,
}

const UNITS: [UnitRecord; 3] = [
    UnitRecord {
        name: "coal",
        min_gen: 100.0,
        max_gen: 400.0,
        ramp: 150.0,
        fixed_cost: 500.0,
        variable_cost: 10.0,
        startup_cost: 800.0,
        initially_on: true,
    },
    UnitRecord {
        name: "gas",
        min_gen: 50.0,
        max_gen: 250.0,
        ramp: 200.0,
        fixed_cost: 300.0,
        variable_cost: 25.0,
        startup_cost: 400.0,
        initially_on: false,
    },
    UnitRecord {
        name: "peaker",
        min_gen: 10.0,
        max_gen: 100.0,
        ramp: 100.0,
        fixed_cost: 100.0,
        variable_cost: 60.0,
        startup_cost: 100.0,
        initially_on: false,
    },
];

const DEMAND: [f64; 4] = [350.0, 500.0, 620.0, 420.0];

fn main() {
    let periods = DEMAND.len();
    let mut model = Model::new();

    // on[u][t], gen[u][t], started[u][t]
    let mut on = Vec::new();
    let mut gen = Vec::new();
    let mut started = Vec::new();
    for unit in &UNITS {
        let mut on_row = Vec::new();
        let mut gen_row = Vec::new();
        let mut started_row = Vec::new();
        for t in 0..periods {
            on_row.push(model.add_binary(format!("on_{}_{t}", unit.name)).unwrap());
            gen_row.push(
                model
                    .add_continuous(0.0, unit.max_gen, format!("gen_{}_{t}", unit.name))
                    .unwrap(),
            );
            started_row.push(
                model
                    .add_binary(format!("started_{}_{t}", unit.name))
                    .unwrap(),
            );
        }
        on.push(on_row);
        gen.push(gen_row);
        started.push(started_row);
    }

    for (u, unit) in UNITS.iter().enumerate() {
        for t in 0..periods {
            // Generation window while committed.
            model.add_constraint((gen[u][t] - unit.max_gen * on[u][t]).leq(0.0));
            model.add_constraint((gen[u][t] - unit.min_gen * on[u][t]).geq(0.0));

            // Ramp limits between periods (initial output taken as zero,
            // or min_gen for initially-on units).
            let previous: LinExpr = if t == 0 {
                let initial = if unit.initially_on { unit.min_gen } else { 0.0 };
                LinExpr::constant(initial)
            } else {
                LinExpr::from(gen[u][t - 1])
            };
            model.add_constraint((gen[u][t] - previous.clone()).leq(unit.ramp));
            model.add_constraint((previous - gen[u][t]).leq(unit.ramp));

            // Startup indicator: started >= on[t] - on[t-1].
            let prev_on: LinExpr = if t == 0 {
                LinExpr::constant(if unit.initially_on { 1.0 } else { 0.0 })
            } else {
                LinExpr::from(on[u][t - 1])
            };
            model.add_constraint((on[u][t] - prev_on - started[u][t]).leq(0.0));
        }
    }

    // Demand balance per period.
    for (t, &demand) in DEMAND.iter().enumerate() {
        let supplied: LinExpr = (0..UNITS.len()).map(|u| LinExpr::from(gen[u][t])).sum();
        model.add_constraint(supplied.eq(demand).named(format!("demand_{t}")));
    }

    // Cost terms, tracked as KPIs.
    let mut fixed_cost = LinExpr::new();
    let mut energy_cost = LinExpr::new();
    let mut startup_cost = LinExpr::new();
    for (u, unit) in UNITS.iter().enumerate() {
        for t in 0..periods {
            fixed_cost += unit.fixed_cost * on[u][t];
            energy_cost += unit.variable_cost * gen[u][t];
            startup_cost += unit.startup_cost * started[u][t];
        }
    }
    let total_cost = fixed_cost.clone() + energy_cost.clone() + startup_cost.clone();

    model.add_kpi("fixed_cost", fixed_cost).unwrap();
    model.add_kpi("energy_cost", energy_cost).unwrap();
    model.add_kpi("startup_cost", startup_cost).unwrap();
    model.set_objective(Sense::Minimize, total_cost);

    let solution = solve(&model, &MipSettings::default());

    println!("=== Unit commitment ===");
    println!("Status:    {}", solution.status);
    println!("Total cost: {:.2}", solution.objective);
    println!("Nodes:     {}", solution.nodes_explored);
    println!();

    if !solution.has_solution() {
        eprintln!("no schedule found");
        std::process::exit(1);
    }

    for name in ["fixed_cost", "energy_cost", "startup_cost"] {
        println!("{name:>14}: {:.2}", model.kpi_value(name, &solution).unwrap());
    }
    println!();

    println!("{:>8} | {:>8} {:>8} {:>8} {:>8}", "unit", "t0", "t1", "t2", "t3");
    for (u, unit) in UNITS.iter().enumerate() {
        let dispatch: Vec<String> = (0..periods)
            .map(|t| {
                if solution.value(on[u][t]) > 0.5 {
                    format!("{:.0}", solution.value(gen[u][t]))
                } else {
                    "-".to_string()
                }
            })
            .collect();
        println!(
            "{:>8} | {:>8} {:>8} {:>8} {:>8}",
            unit.name, dispatch[0], dispatch[1], dispatch[2], dispatch[3]
        );
    }
}
