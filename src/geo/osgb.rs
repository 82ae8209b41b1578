//! Conversion from Ordnance Survey grid references to WGS84 coordinates.
//!
//! Grid references in the directory are OSGB36 eastings/northings. The
//! conversion runs in three steps: an inverse transverse Mercator projection
//! on the Airy 1830 ellipsoid, a Helmert datum transformation to WGS84, and a
//! cartesian-to-geodetic step on the GRS80 ellipsoid. The Helmert parameters
//! are the published national ones, accurate to a few metres across Great
//! Britain, which is well inside the positional quality of the directory's
//! grid references.

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

// Airy 1830 ellipsoid, the OSGB36 datum.
const AIRY_A: f64 = 6_377_563.396;
const AIRY_B: f64 = 6_356_256.909;

// National grid projection constants: central meridian scale, true origin
// (49N 2W) and the false origin offsets.
const SCALE_F0: f64 = 0.999_601_271_7;
const ORIGIN_LAT_DEG: f64 = 49.0;
const ORIGIN_LON_DEG: f64 = -2.0;
const FALSE_E: f64 = 400_000.0;
const FALSE_N: f64 = -100_000.0;

// GRS80 ellipsoid, for the WGS84 datum.
const GRS80_A: f64 = 6_378_137.0;
const GRS80_B: f64 = 6_356_752.3141;

// Helmert transformation OSGB36 -> WGS84: translations in metres, rotations
// in arc seconds, scale in parts per million.
const TX: f64 = 446.448;
const TY: f64 = -125.157;
const TZ: f64 = 542.060;
const RX_SEC: f64 = 0.1502;
const RY_SEC: f64 = 0.2470;
const RZ_SEC: f64 = 0.8421;
const S_PPM: f64 = -20.4894;

/// Transforms an OSGB36 grid reference to a WGS84 longitude/latitude pair.
///
/// Total for finite inputs; references outside Great Britain simply land
/// outside it.
pub fn grid_to_wgs84(eastings: f64, northings: f64) -> LonLat {
    let (lat_osgb, lon_osgb) = inverse_transverse_mercator(eastings, northings);
    let (x, y, z) = geodetic_to_cartesian(lat_osgb, lon_osgb, AIRY_A, AIRY_B);
    let (x, y, z) = helmert_to_wgs84(x, y, z);
    let (lat, lon) = cartesian_to_geodetic(x, y, z, GRS80_A, GRS80_B);

    LonLat {
        longitude: lon.to_degrees(),
        latitude: lat.to_degrees(),
    }
}

/// Inverse transverse Mercator on the Airy 1830 ellipsoid.
///
/// Returns OSGB36 latitude and longitude in radians.
fn inverse_transverse_mercator(eastings: f64, northings: f64) -> (f64, f64) {
    let a = AIRY_A;
    let b = AIRY_B;
    let e2 = 1.0 - (b * b) / (a * a);
    let lat0 = ORIGIN_LAT_DEG.to_radians();
    let lon0 = ORIGIN_LON_DEG.to_radians();

    // Iterate the meridional arc until the northing residual is below 0.01mm.
    let mut lat = (northings - FALSE_N) / (a * SCALE_F0) + lat0;
    loop {
        let m = meridional_arc(lat, lat0);
        let residual = northings - FALSE_N - m;
        if residual.abs() < 0.000_01 {
            break;
        }
        lat += residual / (a * SCALE_F0);
    }

    let sin_lat = lat.sin();
    let nu = a * SCALE_F0 * (1.0 - e2 * sin_lat * sin_lat).powf(-0.5);
    let rho = a * SCALE_F0 * (1.0 - e2) * (1.0 - e2 * sin_lat * sin_lat).powf(-1.5);
    let eta2 = nu / rho - 1.0;

    let tan_lat = lat.tan();
    let tan2 = tan_lat * tan_lat;
    let tan4 = tan2 * tan2;
    let tan6 = tan4 * tan2;
    let sec_lat = 1.0 / lat.cos();

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu.powi(3))
        * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
    let ix = tan_lat / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
    let x = sec_lat / nu;
    let xi = sec_lat / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * tan2);
    let xii = sec_lat / (120.0 * nu.powi(5)) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
    let xiia = sec_lat / (5040.0 * nu.powi(7))
        * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

    let de = eastings - FALSE_E;
    let de2 = de * de;
    let de3 = de2 * de;
    let de4 = de2 * de2;
    let de5 = de4 * de;
    let de6 = de4 * de2;
    let de7 = de6 * de;

    let lat_out = lat - vii * de2 + viii * de4 - ix * de6;
    let lon_out = lon0 + x * de - xi * de3 + xii * de5 - xiia * de7;

    (lat_out, lon_out)
}

/// Meridional arc from the true origin latitude, in metres.
fn meridional_arc(lat: f64, lat0: f64) -> f64 {
    let n = (AIRY_A - AIRY_B) / (AIRY_A + AIRY_B);
    let n2 = n * n;
    let n3 = n2 * n;
    let dlat = lat - lat0;
    let slat = lat + lat0;

    AIRY_B
        * SCALE_F0
        * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * dlat
            - (3.0 * n + 3.0 * n2 + 2.625 * n3) * dlat.sin() * slat.cos()
            + (1.875 * n2 + 1.875 * n3) * (2.0 * dlat).sin() * (2.0 * slat).cos()
            - (35.0 / 24.0) * n3 * (3.0 * dlat).sin() * (3.0 * slat).cos())
}

fn geodetic_to_cartesian(lat: f64, lon: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let e2 = 1.0 - (b * b) / (a * a);
    let sin_lat = lat.sin();
    let nu = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let x = nu * lat.cos() * lon.cos();
    let y = nu * lat.cos() * lon.sin();
    let z = (1.0 - e2) * nu * sin_lat;

    (x, y, z)
}

fn helmert_to_wgs84(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let s = 1.0 + S_PPM * 1e-6;
    let rx = (RX_SEC / 3600.0).to_radians();
    let ry = (RY_SEC / 3600.0).to_radians();
    let rz = (RZ_SEC / 3600.0).to_radians();

    let xp = TX + s * x - rz * y + ry * z;
    let yp = TY + rz * x + s * y - rx * z;
    let zp = TZ - ry * x + rx * y + s * z;

    (xp, yp, zp)
}

/// Cartesian to geodetic latitude/longitude in radians, by fixed-point
/// iteration on the latitude.
fn cartesian_to_geodetic(x: f64, y: f64, z: f64, a: f64, b: f64) -> (f64, f64) {
    let e2 = 1.0 - (b * b) / (a * a);
    let p = (x * x + y * y).sqrt();

    let mut lat = z.atan2(p * (1.0 - e2));
    loop {
        let sin_lat = lat.sin();
        let nu = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * nu * sin_lat).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    let lon = y.atan2(x);

    (lat, lon)
}
