use eyre::{eyre, WrapErr};
use mount_pointing::astro_math::{format_sexagesimal, hour_angle_from_ra, ra_from_hour_angle};
use mount_pointing::telescope_control::encoder::EncoderMapper;
use mount_pointing::telescope_control::pointing::CorrectionChain;
use mount_pointing::util::*;
use mount_pointing::{Clock, Config, SystemClock};

/// Shows where the configured mount would be driven for a target, without opening a link.
///
/// Usage: mount_pointing <ra-hours> <dec-degrees>
fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let config: Config = confy::load_path("config.toml").wrap_err("Couldn't parse configuration")?;

    let mut args = std::env::args().skip(1);
    let (ra, dec) = match (args.next(), args.next()) {
        (Some(ra), Some(dec)) => (
            ra.parse::<Hours>().wrap_err("RA must be in decimal hours")?,
            dec.parse::<Degrees>().wrap_err("Dec must be in decimal degrees")?,
        ),
        _ => return Err(eyre!("Usage: mount_pointing <ra-hours> <dec-degrees>")),
    };
    check_ra(ra)?;
    check_dec(dec)?;

    let kind = config
        .mount_details
        .kind
        .ok_or_else(|| eyre!("mount_details.kind is not set in config.toml"))?;
    let site = config.observation_location;
    let chain = CorrectionChain::new(&config)?;
    let mapper = EncoderMapper::new(kind, site.latitude, &config.mount_details);

    let lst = SystemClock::new().local_sidereal_time(site.longitude);
    let (ha, apparent_dec) =
        chain.apparent_from_real(hour_angle_from_ra(lst, ra), dec, config.pointing_model);
    tracing::debug!("Apparent HA {} Dec {}", ha, apparent_dec);

    println!("LST          {}", format_sexagesimal(lst));
    println!(
        "Apparent     RA {}  Dec {}",
        format_sexagesimal(ra_from_hour_angle(lst, ha)),
        format_sexagesimal(apparent_dec)
    );
    println!("Pier side    {:?}", mapper.pier_side(ha, apparent_dec));

    let counts = mapper.encoder_from_apparent(ha, apparent_dec)?;
    println!(
        "Encoders     {:#08x} / {:#08x}",
        counts.primary, counts.secondary
    );
    Ok(())
}
