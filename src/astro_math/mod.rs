use chrono::{Datelike, Timelike};
use polynomials::poly;
use std::f64::consts::{PI, TAU};

pub type Hours = f64;
pub type Degrees = f64;
pub type Radians = f64;

pub fn deg_to_rad(degrees: Degrees) -> Radians {
    PI * degrees / 180.
}

pub fn rad_to_deg(rad: Radians) -> Degrees {
    180. * rad / PI
}

pub fn hours_to_rad(hours: Hours) -> Radians {
    PI * hours / 12.
}

pub fn rad_to_hours(rad: Radians) -> Hours {
    12. * rad / PI
}

pub fn deg_to_hours(deg: Degrees) -> Hours {
    deg / 15.
}

pub fn hours_to_deg(hours: Hours) -> Degrees {
    hours * 15.
}

// Convert hms to hours or dms to degrees
pub fn ms_to_dec(d: u32, minutes: u32, seconds: f64) -> f64 {
    (d as f64) + (minutes as f64) / 60. + seconds / 3600.
}

/// Splits a non-negative value into whole units, minutes and seconds
pub fn dec_to_ms(dec: f64) -> (u32, u32, f64) {
    let dec = dec.abs();
    let h = dec as u32;
    let m_raw = (dec - h as f64) * 60.;
    let m = m_raw as u32;
    let s = (m_raw - m as f64) * 60.;

    (h, m, s)
}

/// Formats hours or degrees as a signed sexagesimal string, e.g. `-12:30:00.0`
pub fn format_sexagesimal(value: f64) -> String {
    let (whole, minutes, seconds) = dec_to_ms(value);
    let sign = if value < 0. { "-" } else { "+" };
    format!("{}{:02}:{:02}:{:04.1}", sign, whole, minutes, seconds)
}

/// Calculates the Julian Date of a time
/// see https://scienceworld.wolfram.com/astronomy/JulianDate.html
fn calc_jd(time: chrono::DateTime<chrono::Utc>) -> f64 {
    let y = time.year() as f64;
    let m = time.month() as f64;
    let d = time.day() as f64;

    let mut jd = 367. * y;
    jd -= f64::floor(7. * (y + f64::floor((m + 9.) / 12.)) / 4.);
    jd -= f64::floor(3. * (f64::floor((y + (m - 9.) / 7.) / 100.) + 1.) / 4.);
    jd += f64::floor(275. * m / 9.);
    jd += d;
    jd += 1721028.5;
    jd + ms_to_dec(time.hour(), time.minute(), time.second() as f64) / 24.
}

// see https://thecynster.home.blog/2019/11/04/calculating-sidereal-time/
pub fn calculate_greenwich_sidereal_time(time: chrono::DateTime<chrono::Utc>) -> Hours {
    // The result will be off by the number of leap seconds different from this on the date given
    const LEAP_SECOND_TOTAL: u32 = 27;

    let jd_utc = calc_jd(time);

    let du = jd_utc - 2451545.0;
    let theta = rad_to_hours(modulo(
        TAU * (0.779_057_273_264f64 + 1.002_737_811_911_354_5f64 * du),
        TAU,
    ));

    let poly = poly![
        0.014506,
        4612.156534,
        1.3915817,
        -0.00000044,
        -0.000029956,
        -0.0000000368,
    ];
    let jd_tt = jd_utc + ((LEAP_SECOND_TOTAL as f64 + 32.184) / 3600.) / 24.;
    let t = (jd_tt - 2451545.0) / 36525.; // centuries

    let gmstp = deg_to_hours(modulo(poly.eval(t).unwrap_or_default() / 3600., 360.));

    modulo(theta + gmstp, 24.)
}

/// longitude in degrees, east positive
/// returns hours
pub fn calculate_local_sidereal_time(
    time: chrono::DateTime<chrono::Utc>,
    longitude: Degrees,
) -> Hours {
    let greenwich_sidereal_time = calculate_greenwich_sidereal_time(time);
    modulo(greenwich_sidereal_time + deg_to_hours(longitude), 24.)
}

/// Hour angle in [-12, 12) of a right ascension at the given sidereal time
pub fn hour_angle_from_ra(lst: Hours, ra: Hours) -> Hours {
    map12(lst - ra)
}

/// Right ascension in [0, 24) of an hour angle at the given sidereal time
pub fn ra_from_hour_angle(lst: Hours, ha: Hours) -> Hours {
    map24(lst - ha)
}

/// Converts an hour angle and declination to azimuth and altitude.
/// Azimuth is north-referenced and increases toward the east.
pub fn equatorial_to_horizontal(ha: Hours, dec: Degrees, lat: Degrees) -> (Degrees, Degrees) {
    let ha = hours_to_rad(ha);
    let dec = deg_to_rad(dec);
    let lat = deg_to_rad(lat);

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    let alt = sin_alt.clamp(-1., 1.).asin();

    let az = f64::atan2(
        -dec.cos() * ha.sin(),
        dec.sin() * lat.cos() - dec.cos() * ha.cos() * lat.sin(),
    );

    (map360(rad_to_deg(az)), rad_to_deg(alt))
}

/// Converts an azimuth and altitude to an hour angle in [-12, 12) and a declination
pub fn horizontal_to_equatorial(az: Degrees, alt: Degrees, lat: Degrees) -> (Hours, Degrees) {
    let az = deg_to_rad(az);
    let alt = deg_to_rad(alt);
    let lat = deg_to_rad(lat);

    let sin_dec = alt.sin() * lat.sin() + alt.cos() * lat.cos() * az.cos();
    let dec = sin_dec.clamp(-1., 1.).asin();

    let ha = f64::atan2(
        -az.sin() * alt.cos(),
        alt.sin() * lat.cos() - alt.cos() * az.cos() * lat.sin(),
    );

    (map12(rad_to_hours(ha)), rad_to_deg(dec))
}

pub fn calculate_alt_from_ha_dec(ha: Hours, dec: Degrees, lat: Degrees) -> Degrees {
    equatorial_to_horizontal(ha, dec, lat).1
}

/// Reflects a declination that has run past a pole.
/// Returns the folded declination and whether the hour angle must move by 12h.
pub fn fold_declination(dec: Degrees) -> (Degrees, bool) {
    if dec > 90. {
        (180. - dec, true)
    } else if dec < -90. {
        (-180. - dec, true)
    } else {
        (dec, false)
    }
}

/// Folds the declination back over the pole and wraps the hour angle to [-12, 12)
pub fn normalize_ha_dec(ha: Hours, dec: Degrees) -> (Hours, Degrees) {
    let (dec, flipped) = fold_declination(dec);
    let ha = if flipped { ha + 12. } else { ha };
    (map12(ha), dec)
}

pub fn modulo(val: f64, base: f64) -> f64 {
    ((val % base) + base) % base
}

/// Wraps to [0, 24)
pub fn map24(hours: Hours) -> Hours {
    let h = modulo(hours, 24.);
    // modulo of a tiny negative value rounds up to the base
    if h >= 24. {
        0.
    } else {
        h
    }
}

/// Wraps to [-12, 12)
pub fn map12(hours: Hours) -> Hours {
    map24(hours + 12.) - 12.
}

/// Wraps to [0, 360)
pub fn map360(degrees: Degrees) -> Degrees {
    let d = modulo(degrees, 360.);
    if d >= 360. {
        0.
    } else {
        d
    }
}

/// Wraps to [-180, 180)
pub fn map180(degrees: Degrees) -> Degrees {
    map360(degrees + 180.) - 180.
}
