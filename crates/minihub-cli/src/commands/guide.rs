//! Usage guide

pub const GUIDE: &str = "\
minihub-admin: inspect a MiniHub job board deployment

Getting started
  1. Publish the minihub package and note the package id together with the
     shared JobBoard, UserRegistry and EmployerRegistry object ids.
  2. minihub-admin config init --network testnet --package <ID> \\
        --job-board <ID> --user-registry <ID> --employer-registry <ID>
  3. minihub-admin stats

Commands
  config init|show|update      Manage minihub.config.json
  stats [--detailed]           Platform counters and rates
  jobs list [--active] [--filled] [--limit N]
  jobs view <ID> [--show-applications]
  jobs search <TEXT>           Match titles and descriptions
  users list [--limit N]
  users view <ID|ADDRESS>
  users search <SKILL>... [--all]
  employers list [--limit N]
  employers view <ID|ADDRESS>
  employers search <INDUSTRY>
  events jobs|applications|hires|profiles [--limit N]
  export jobs|users|employers [-o FILE]
  export all [--dir DIR]       Everything plus report.json
  monitor [--interval SECS]    Refresh statistics until Ctrl+C

Global options
  --config <PATH>   Config file (default: minihub.config.json)
  --rpc-url <URL>   Override the network's fullnode
  --json            Machine-readable output
  --log-level <LVL> Log filter when RUST_LOG is unset (default: warn)
";

pub fn execute() {
    print!("{}", GUIDE);
}
