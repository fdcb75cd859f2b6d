mod commands;
mod stroke;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use commands::StrokeCmd;
use quill::math::{point, Point};
use quill::tessellation::{LineCap, LineJoin, SolidFill, Stroke};

use std::fs::File;
use std::io::{self, stdout};
use std::process;

type DefaultStroke = Stroke<SolidFill>;

fn main() {
    env_logger::init();

    let matches = App::new("quill command-line interface")
        .version("0.1")
        .about("Line stroke tessellator")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("stroke")
            .about("Strokes a polyline and prints the produced batches")
            .arg(Arg::with_name("WIDTH")
                .short("w")
                .long("width")
                .help("Sets the half width of the line (5 by default)")
                .value_name("WIDTH")
                .takes_value(true)
            )
            .arg(Arg::with_name("CAP")
                .long("cap")
                .help("Sets the line cap")
                .value_name("CAP")
                .takes_value(true)
                .possible_values(&["butt", "square", "round"])
            )
            .arg(Arg::with_name("JOIN")
                .long("join")
                .help("Sets the line join")
                .value_name("JOIN")
                .takes_value(true)
                .possible_values(&["miter", "round", "bevel"])
            )
            .arg(Arg::with_name("MITER_LIMIT")
                .long("miter-limit")
                .help("Sets the cosine under which miter joins are beveled (-0.8 by default)")
                .value_name("LIMIT")
                .takes_value(true)
                .allow_hyphen_values(true)
            )
            .arg(Arg::with_name("LOOP")
                .short("l")
                .long("loop")
                .help("Connects the last point back to the first one")
            )
            .arg(Arg::with_name("CAPACITY")
                .short("c")
                .long("capacity")
                .help("Sets the maximum number of vertices per batch")
                .value_name("VERTICES")
                .takes_value(true)
            )
            .arg(Arg::with_name("DUMP")
                .short("d")
                .long("dump")
                .help("Prints the vertices and indices of every batch")
            )
            .arg(Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
            )
            .arg(Arg::with_name("POINTS")
                .help("The points of the line, as x,y pairs")
                .value_name("POINTS")
                .multiple(true)
                .allow_hyphen_values(true)
            )
        )
        .get_matches();

    if let Some(stroke_matches) = matches.subcommand_matches("stroke") {
        let cmd = match stroke_cmd(stroke_matches) {
            Ok(cmd) => cmd,
            Err(message) => {
                log::error!("{}", message);
                process::exit(2);
            }
        };

        if let Err(err) = stroke::stroke(cmd) {
            log::error!("{}", err);
            process::exit(1);
        }
    }
}

fn stroke_cmd(matches: &ArgMatches) -> Result<StrokeCmd, String> {
    let points = matches
        .values_of("POINTS")
        .map(|values| values.map(parse_point).collect::<Result<Vec<_>, _>>())
        .unwrap_or_else(|| Ok(Vec::new()))?;

    let width = get_number(matches, "WIDTH", DefaultStroke::DEFAULT_WIDTH)?;
    if width <= 0.0 || !width.is_finite() {
        return Err(format!("invalid width {}", width));
    }

    let miter_limit = get_number(matches, "MITER_LIMIT", DefaultStroke::DEFAULT_MITER_LIMIT)?;
    if !(-1.0..=1.0).contains(&miter_limit) {
        return Err(format!("miter limit {} is not in [-1, 1]", miter_limit));
    }

    let capacity = match matches.value_of("CAPACITY") {
        Some(s) => s
            .parse::<usize>()
            .map_err(|_| format!("invalid capacity {:?}", s))?,
        None => u16::MAX as usize,
    };

    let cap = match matches.value_of("CAP") {
        Some("square") => LineCap::Square,
        Some("round") => LineCap::Round,
        _ => DefaultStroke::DEFAULT_LINE_CAP,
    };

    let join = match matches.value_of("JOIN") {
        Some("miter") => LineJoin::Miter,
        Some("round") => LineJoin::Round,
        _ => DefaultStroke::DEFAULT_LINE_JOIN,
    };

    let output: Box<dyn io::Write> = match matches.value_of("OUTPUT") {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => return Err(format!("cannot create {}: {}", path, err)),
        },
        None => Box::new(stdout()),
    };

    Ok(StrokeCmd {
        points,
        width,
        cap,
        join,
        miter_limit,
        closed: matches.is_present("LOOP"),
        capacity,
        dump: matches.is_present("DUMP"),
        output,
    })
}

fn parse_point(s: &str) -> Result<Point, String> {
    let mut coords = s.split(',').map(|c| c.trim().parse::<f32>());
    match (coords.next(), coords.next(), coords.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok(point(x, y)),
        _ => Err(format!("invalid point {:?}, expected x,y", s)),
    }
}

fn get_number(matches: &ArgMatches, name: &str, default: f32) -> Result<f32, String> {
    match matches.value_of(name) {
        Some(s) => s.parse().map_err(|_| format!("invalid {} {:?}", name.to_lowercase(), s)),
        None => Ok(default),
    }
}

#[test]
fn points() {
    assert_eq!(parse_point("1,2"), Ok(point(1.0, 2.0)));
    assert_eq!(parse_point(" -1.5 , 3"), Ok(point(-1.5, 3.0)));
    assert!(parse_point("1").is_err());
    assert!(parse_point("1,2,3").is_err());
    assert!(parse_point("a,b").is_err());
}
