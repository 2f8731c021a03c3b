//! Cloud load-balancing example.
//!
//! Places users on servers under CPU and memory capacities. The first
//! solve minimizes the number of active servers; a second pass sweeps a
//! budget on active servers while minimizing user migrations away from
//! their current placement, tracing the consolidation-vs-disruption
//! trade-off by re-solving the same model with mutated bounds.

use lp_core::{LinExpr, Model, Sense};
use lp_mip::{solve, MipSettings};

struct UserRecord {
    name: &'static str,
    cpu: f64,
    mem: f64,
    current_server: usize,
}

struct ServerRecord {
    name: &'static str,
    cpu_capacity: f64,
    mem_capacity: f64,
}

const USERS: [UserRecord; 6] = [
    UserRecord { name: "u0", cpu: 12.0, mem: 4.0, current_server: 0 },
    UserRecord { name: "u1", cpu: 8.0, mem: 6.0, current_server: 0 },
    UserRecord { name: "u2", cpu: 20.0, mem: 10.0, current_server: 1 },
    UserRecord { name: "u3", cpu: 15.0, mem: 2.0, current_server: 1 },
    UserRecord { name: "u4", cpu: 5.0, mem: 8.0, current_server: 2 },
    UserRecord { name: "u5", cpu: 10.0, mem: 6.0, current_server: 2 },
];

const SERVERS: [ServerRecord; 3] = [
    ServerRecord { name: "s0", cpu_capacity: 40.0, mem_capacity: 24.0 },
    ServerRecord { name: "s1", cpu_capacity: 40.0, mem_capacity: 24.0 },
    ServerRecord { name: "s2", cpu_capacity: 40.0, mem_capacity: 24.0 },
];

fn main() {
    let mut model = Model::new();

    // assign[u][s] = 1 when user u runs on server s.
    let mut assign = Vec::new();
    for user in &USERS {
        let mut row = Vec::new();
        for server in &SERVERS {
            row.push(
                model
                    .add_binary(format!("x_{}_{}", user.name, server.name))
                    .unwrap(),
            );
        }
        assign.push(row);
    }
    let active: Vec<_> = SERVERS
        .iter()
        .map(|s| model.add_binary(format!("y_{}", s.name)).unwrap())
        .collect();

    // Every user placed exactly once.
    for (u, user) in USERS.iter().enumerate() {
        let placed: LinExpr = assign[u].iter().map(|&v| LinExpr::from(v)).sum();
        model.add_constraint(placed.eq(1.0).named(format!("place_{}", user.name)));
    }

    // Capacities bind only on active servers.
    for (s, server) in SERVERS.iter().enumerate() {
        let cpu: LinExpr = USERS
            .iter()
            .enumerate()
            .map(|(u, user)| user.cpu * assign[u][s])
            .sum();
        let mem: LinExpr = USERS
            .iter()
            .enumerate()
            .map(|(u, user)| user.mem * assign[u][s])
            .sum();
        model.add_constraint((cpu - server.cpu_capacity * active[s]).leq(0.0));
        model.add_constraint((mem - server.mem_capacity * active[s]).leq(0.0));
    }

    let server_count: LinExpr = active.iter().map(|&v| LinExpr::from(v)).sum();
    // A user not on its current server counts as one migration.
    let migrations: LinExpr = USERS
        .iter()
        .enumerate()
        .map(|(u, user)| -1.0 * assign[u][user.current_server] + 1.0)
        .sum();

    model.add_kpi("number_of_active_servers", server_count.clone()).unwrap();
    model.add_kpi("migrations", migrations.clone()).unwrap();

    // Phase 1: consolidate as hard as possible.
    model.set_objective(Sense::Minimize, server_count.clone());
    let consolidation = solve(&model, &MipSettings::default());
    println!("=== Consolidation ===");
    println!("Status: {}", consolidation.status);
    let min_servers = consolidation.objective;
    println!("Minimum active servers: {min_servers:.0}");
    println!(
        "Migrations at that point: {:.0}",
        model.kpi_value("migrations", &consolidation).unwrap()
    );
    println!();

    // Phase 2: Pareto sweep. Bound the server budget through a variable's
    // bounds and minimize migrations under each budget.
    let budget = model
        .add_integer(0.0, SERVERS.len() as f64, "server_budget")
        .unwrap();
    model.add_constraint((server_count - budget).leq(0.0).named("budget"));
    model.set_objective(Sense::Minimize, migrations);

    println!("=== Pareto frontier: server budget vs migrations ===");
    println!("{:>7} | {:>10} | {:>7}", "budget", "migrations", "status");
    let mut k = SERVERS.len() as f64;
    while k >= min_servers {
        model.set_var_bounds(budget, 0.0, k).unwrap();
        let sweep = solve(&model, &MipSettings::default());
        let migrated = model
            .kpi_value("migrations", &sweep)
            .map(|m| format!("{m:.0}"))
            .unwrap_or_else(|_| "-".to_string());
        println!("{:>7.0} | {:>10} | {:>7}", k, migrated, sweep.status);
        k -= 1.0;
    }
}
