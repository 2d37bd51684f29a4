use clap::{
    app_from_crate, crate_authors, crate_description, crate_name, crate_version,
    AppSettings, Arg, ArgMatches,
};
use log::LevelFilter;
use std::{path::PathBuf, str::FromStr};

use crate::validators::*;
use tile_paths::{BoundingBox, Config, DEFAULT_BASEDIR, TILE_EXT};

const LAT_ARG: &str = "lat";
const LNG_ARG: &str = "lng";
const ZOOMS_ARG: &str = "zooms";
const BASEDIR_ARG: &str = "basedir";
const EXT_ARG: &str = "ext";
const STYLE_ARG: &str = "style";
const META_ARG: &str = "meta";
const META_SIZE_ARG: &str = "meta_size";
const DRY_RUN_ARG: &str = "dry_run";
const VERBOSE_ARG: &str = "verbose";

// clap wants a &'static str default
const META_SIZE_STR: &str = "8";

pub struct Args {
    pub bounding_box: BoundingBox,
    pub zoom_start: u8,
    pub zoom_end: u8,
    pub basedir: PathBuf,
    pub ext: String,
    pub style: String,
    pub meta: bool,
    pub meta_size: u32,
    pub dry_run: bool,
    pub log_level: LevelFilter,
}

impl std::convert::From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bounding_box: args.bounding_box,
            zoom_start: args.zoom_start,
            zoom_end: args.zoom_end,
            basedir: args.basedir,
            style: args.style,
            ext: args.ext,
            meta: args.meta,
            meta_size: args.meta_size,
        }
    }
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(&app().get_matches())
    }

    fn from_matches(matches: &ArgMatches<'_>) -> Self {
        // all values below went through the validators already
        let lat = pair::<f64>(matches, LAT_ARG);
        let lng = pair::<f64>(matches, LNG_ARG);
        let (zoom_start, zoom_end) = pair::<u8>(matches, ZOOMS_ARG);

        let log_level = match matches.occurrences_of(VERBOSE_ARG) {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Self {
            bounding_box: BoundingBox::new(lat, lng),
            zoom_start,
            zoom_end,
            basedir: PathBuf::from(matches.value_of(BASEDIR_ARG).unwrap()),
            ext: matches.value_of(EXT_ARG).unwrap().to_owned(),
            style: matches.value_of(STYLE_ARG).unwrap_or_default().to_owned(),
            meta: matches.is_present(META_ARG),
            meta_size: matches.value_of(META_SIZE_ARG).unwrap().parse().unwrap(),
            dry_run: matches.is_present(DRY_RUN_ARG),
            log_level,
        }
    }
}

fn pair<T: FromStr>(matches: &ArgMatches<'_>, name: &str) -> (T, T)
where
    T::Err: std::fmt::Debug,
{
    let values: Vec<T> = matches
        .values_of(name)
        .unwrap()
        .map(|v| v.parse().unwrap())
        .collect();
    let mut values = values.into_iter();

    (values.next().unwrap(), values.next().unwrap())
}

fn app() -> clap::App<'static, 'static> {
    app_from_crate!()
        .setting(AppSettings::GlobalVersion)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name(LAT_ARG)
                .help("Latitudes of the bounding box boundaries (in degrees, any order)")
                .required(true)
                .validator(is_numeric::<f64>)
                .takes_value(true)
                .number_of_values(2)
                .value_names(&["LAT", "LAT"])
                .allow_hyphen_values(true)
                .long("lat"),
        )
        .arg(
            Arg::with_name(LNG_ARG)
                .help("Longitudes of the bounding box boundaries (in degrees, any order)")
                .required(true)
                .validator(is_numeric::<f64>)
                .takes_value(true)
                .number_of_values(2)
                .value_names(&["LNG", "LNG"])
                .allow_hyphen_values(true)
                .long("lng"),
        )
        .arg(
            Arg::with_name(ZOOMS_ARG)
                .help("The first and last zoom level to list (any order)")
                .validator(is_numeric::<u8>)
                .default_values(&["10", "10"])
                .takes_value(true)
                .number_of_values(2)
                .value_names(&["START", "END"])
                .long("zooms"),
        )
        .arg(
            Arg::with_name(BASEDIR_ARG)
                .help("The tile cache directory the paths are rooted in")
                .default_value(DEFAULT_BASEDIR)
                .takes_value(true)
                .short("d")
                .long("basedir"),
        )
        .arg(
            Arg::with_name(EXT_ARG)
                .help("The tile file extension, including the leading dot")
                .default_value(TILE_EXT)
                .takes_value(true)
                .short("e")
                .long("ext"),
        )
        .arg(
            Arg::with_name(STYLE_ARG)
                .help("The map style, inserted as a directory below the base directory")
                .takes_value(true)
                .short("s")
                .long("style"),
        )
        .arg(
            Arg::with_name(META_ARG)
                .help("List metatile files instead of single tiles")
                .takes_value(false)
                .short("m")
                .long("meta"),
        )
        .arg(
            Arg::with_name(META_SIZE_ARG)
                .help("The edge length of a metatile (in tiles)")
                .validator(is_numeric_min(1))
                .default_value(META_SIZE_STR)
                .takes_value(true)
                .long("meta-size"),
        )
        .arg(
            Arg::with_name(DRY_RUN_ARG)
                .help("Don't print any paths, just determine how many would be listed.")
                .takes_value(false)
                .long("dry-run"),
        )
        .arg(
            Arg::with_name(VERBOSE_ARG)
                .help("Log more details to stderr (repeat for more)")
                .multiple(true)
                .takes_value(false)
                .short("v")
                .long("verbose"),
        )
}
