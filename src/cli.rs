// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("sidur")
        .about("Work scheduling, day allocation, and labor-cost tracking for a construction back office")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("client")
                .about("Manage clients")
                .subcommand(
                    Command::new("add")
                        .about("Add a client")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("contact").long("contact")),
                )
                .subcommand(Command::new("list").about("List clients"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a client")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("project")
                .about("Manage projects")
                .subcommand(
                    Command::new("add")
                        .about("Add a project for an existing client")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("status").long("status")),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List projects with labor cost"))
                        .arg(Arg::new("client").long("client").help("Filter by client name")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a project")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("worker")
                .about("Manage the worker roster and daily rates")
                .subcommand(
                    Command::new("add")
                        .about("Add a worker")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List workers with rate and total scheduled days"),
                ))
                .subcommand(
                    Command::new("set-rate")
                        .about("Set a worker's daily rate")
                        .arg(Arg::new("worker").long("worker").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a worker")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("schedule")
                .about("Assign workers to projects by day")
                .subcommand(
                    Command::new("assign")
                        .about("Assign a worker to a project on a date")
                        .arg(Arg::new("worker").long("worker").required(true))
                        .arg(Arg::new("project").long("project").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("unassign")
                        .about("Delete an assignment by id")
                        .arg(Arg::new("id").long("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the deletion"),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List assignments"))
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("worker").long("worker").help("Filter by worker id"))
                        .arg(Arg::new("project").long("project").help("Filter by project name")),
                )
                .subcommand(
                    Command::new("day")
                        .about("Show all assignments on a date")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD")),
                )
                .subcommand(
                    json_flags(
                        Command::new("worker-day")
                            .about("Show how a worker's day splits across projects"),
                    )
                    .arg(Arg::new("worker").long("worker").required(true))
                    .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Labor-cost reports")
                .subcommand(json_flags(
                    Command::new("workers").about("Days, rate, and total expense per worker"),
                ))
                .subcommand(
                    json_flags(
                        Command::new("project")
                            .about("Itemized labor cost for one project"),
                    )
                    .arg(Arg::new("project").long("project").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("assignments")
                        .about("Export all assignments")
                        .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check for dangling references and missing rates"))
}
