//! COLMAP text format support
//!
//! A reconstruction is stored as three co-located files:
//! - `cameras.txt`: `CAMERA_ID MODEL WIDTH HEIGHT PARAMS...`
//! - `images.txt`: `IMAGE_ID QW QX QY QZ TX TY TZ CAMERA_ID NAME`, each followed
//!   by one line reserved for 2D observations (`X Y POINT3D_ID` triples)
//! - `points3D.txt`: `POINT3D_ID X Y Z R G B ERROR TRACK...`
//!
//! Lines starting with `#` and blank or whitespace-only lines between records
//! are skipped.
//! Field counts are not validated: a missing or unparsable mandatory field
//! takes its default value, as does every field after it, and a
//! variable-length tail ends at the first token that does not parse.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use sparsedit_core::{
    Camera, CameraId, CameraPose, Image, ImageId, Observation, Point3, Point3D, Point3DId,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};

pub const CAMERAS_FILE: &str = "cameras.txt";
pub const IMAGES_FILE: &str = "images.txt";
pub const POINTS3D_FILE: &str = "points3D.txt";

const CAMERAS_HEADER: &str = "# Camera list with one line of data per camera:\n\
                              #   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS\n";
const IMAGES_HEADER: &str = "# Image list with one line of data per image:\n\
                             #   IMAGE_ID, QVEC (qw, qx, qy, qz), TVEC (tx, ty, tz), CAMERA_ID, NAME\n";
const POINTS3D_HEADER: &str = "# 3D point list with one line of data per point:\n\
                               #   POINT3D_ID, X, Y, Z, R, G, B, ERROR, TRACK[]\n";

/// Options for reading text reconstructions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextReadOptions {
    /// Parse the 2D observation line that follows every image record.
    /// When disabled the line is consumed and discarded.
    pub read_observations: bool,
}

/// Locations of the three files of one reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionPaths {
    pub points: PathBuf,
    pub cameras: PathBuf,
    pub images: PathBuf,
}

impl ReconstructionPaths {
    pub fn new<P: Into<PathBuf>>(points: P, cameras: P, images: P) -> Self {
        Self {
            points: points.into(),
            cameras: cameras.into(),
            images: images.into(),
        }
    }

    /// The standard file names inside one directory
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            points: dir.join(POINTS3D_FILE),
            cameras: dir.join(CAMERAS_FILE),
            images: dir.join(IMAGES_FILE),
        }
    }
}

/// Whitespace-separated record fields with stream-extraction semantics:
/// once one field fails to parse, all following fields fail too.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    failed: bool,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_whitespace(),
            failed: false,
        }
    }

    fn try_next<T: FromStr>(&mut self) -> Option<T> {
        if self.failed {
            return None;
        }
        let value = self.tokens.next().and_then(|t| t.parse().ok());
        if value.is_none() {
            self.failed = true;
        }
        value
    }

    fn next<T: FromStr + Default>(&mut self) -> T {
        self.try_next().unwrap_or_default()
    }

    fn array<T: FromStr + Default + Copy, const N: usize>(&mut self) -> [T; N] {
        let mut out = [T::default(); N];
        for v in out.iter_mut() {
            *v = self.next();
        }
        out
    }

    /// Remaining fields up to the first one that does not parse
    fn rest<T: FromStr>(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

/// Blank (including whitespace-only) and `#` comment lines hold no record
fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| IoError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn warn_short_record(path: &Path, line_no: usize, kind: &str) {
    log::warn!(
        "{}:{}: incomplete {} record, missing fields default to zero",
        path.display(),
        line_no,
        kind
    );
}

/// COLMAP text reader
pub struct ColmapTextReader;

impl ColmapTextReader {
    /// Read `cameras.txt`
    pub fn read_cameras<P: AsRef<Path>>(path: P) -> Result<BTreeMap<CameraId, Camera>> {
        let path = path.as_ref();
        let reader = open(path)?;
        let mut cameras = BTreeMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| IoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if is_skipped(&line) {
                continue;
            }
            let camera = Self::parse_camera(&line, || warn_short_record(path, line_no + 1, "camera"));
            cameras.insert(camera.id, camera);
        }

        log::debug!("read {} cameras from {}", cameras.len(), path.display());
        Ok(cameras)
    }

    /// Read `images.txt`
    pub fn read_images<P: AsRef<Path>>(
        path: P,
        options: &TextReadOptions,
    ) -> Result<BTreeMap<ImageId, Image>> {
        let path = path.as_ref();
        let reader = open(path)?;
        let read_err = |source| IoError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut images = BTreeMap::new();
        let mut lines = reader.lines().enumerate();

        while let Some((line_no, line)) = lines.next() {
            let line = line.map_err(read_err)?;
            if is_skipped(&line) {
                continue;
            }
            let mut image = Self::parse_image(&line, || warn_short_record(path, line_no + 1, "image"));

            // the observation line always belongs to the record above it
            let observations = lines.next().map(|(_, l)| l).transpose().map_err(read_err)?;
            if options.read_observations {
                if let Some(observations) = observations {
                    image.observations = Self::parse_observations(&observations);
                }
            }
            images.insert(image.id, image);
        }

        log::debug!("read {} images from {}", images.len(), path.display());
        Ok(images)
    }

    /// Read `points3D.txt`
    pub fn read_points3d<P: AsRef<Path>>(path: P) -> Result<BTreeMap<Point3DId, Point3D>> {
        let path = path.as_ref();
        let reader = open(path)?;
        let mut points = BTreeMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| IoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if is_skipped(&line) {
                continue;
            }
            let point = Self::parse_point3d(&line, || warn_short_record(path, line_no + 1, "point"));
            points.insert(point.id, point);
        }

        log::debug!("read {} points from {}", points.len(), path.display());
        Ok(points)
    }

    /// CAMERA_ID MODEL WIDTH HEIGHT PARAMS[]
    fn parse_camera(line: &str, on_short: impl FnOnce()) -> Camera {
        let mut f = Fields::new(line);
        let id = f.next();
        let model = f.next();
        let width = f.next();
        let height = f.next();
        if f.failed {
            on_short();
        }
        Camera {
            id,
            model,
            width,
            height,
            params: f.rest(),
        }
    }

    /// IMAGE_ID QW QX QY QZ TX TY TZ CAMERA_ID NAME
    fn parse_image(line: &str, on_short: impl FnOnce()) -> Image {
        let mut f = Fields::new(line);
        let id = f.next();
        let qvec = f.array::<f64, 4>();
        let tvec = f.array::<f64, 3>();
        let camera_id = f.next();
        let name = f.next();
        if f.failed {
            on_short();
        }
        Image {
            id,
            camera_id,
            name,
            pose: CameraPose::new(qvec, tvec),
            observations: Vec::new(),
        }
    }

    /// POINT3D_ID X Y Z R G B ERROR TRACK[]
    fn parse_point3d(line: &str, on_short: impl FnOnce()) -> Point3D {
        let mut f = Fields::new(line);
        let id = f.next();
        let [x, y, z] = f.array::<f64, 3>();
        // channels are read as integers and truncated to a byte
        let rgb = f.array::<i64, 3>();
        let error = f.next();
        let short = f.failed;
        let track = f.rest();
        if short {
            on_short();
        }
        Point3D {
            id,
            position: Point3::new(x, y, z),
            color: [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8],
            error,
            track,
        }
    }

    /// X Y POINT3D_ID triples
    fn parse_observations(line: &str) -> Vec<Observation> {
        let mut f = Fields::new(line);
        std::iter::from_fn(|| {
            let x = f.try_next()?;
            let y = f.try_next()?;
            let point3d_id = f.try_next()?;
            Some(Observation { x, y, point3d_id })
        })
        .collect()
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| IoError::Create {
            path: path.to_path_buf(),
            source,
        })
}

fn write_with<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let mut writer = create(path)?;
    body(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// COLMAP text writer
pub struct ColmapTextWriter;

impl ColmapTextWriter {
    /// Write `cameras.txt`
    pub fn write_cameras<P: AsRef<Path>>(path: P, cameras: &BTreeMap<CameraId, Camera>) -> Result<()> {
        let path = path.as_ref();
        write_with(path, |w| {
            w.write_all(CAMERAS_HEADER.as_bytes())?;
            for cam in cameras.values() {
                write!(w, "{} {} {} {}", cam.id, cam.model, cam.width, cam.height)?;
                for p in &cam.params {
                    write!(w, " {}", p)?;
                }
                writeln!(w)?;
            }
            Ok(())
        })?;
        log::debug!("wrote {} cameras to {}", cameras.len(), path.display());
        Ok(())
    }

    /// Write `images.txt`. The observation line is always left empty.
    pub fn write_images<P: AsRef<Path>>(path: P, images: &BTreeMap<ImageId, Image>) -> Result<()> {
        let path = path.as_ref();
        write_with(path, |w| {
            w.write_all(IMAGES_HEADER.as_bytes())?;
            for img in images.values() {
                let [qw, qx, qy, qz] = img.pose.qvec;
                let [tx, ty, tz] = img.pose.tvec;
                writeln!(
                    w,
                    "{} {} {} {} {} {} {} {} {} {}",
                    img.id, qw, qx, qy, qz, tx, ty, tz, img.camera_id, img.name
                )?;
                writeln!(w)?;
            }
            Ok(())
        })?;
        log::debug!("wrote {} images to {}", images.len(), path.display());
        Ok(())
    }

    /// Write `points3D.txt`
    pub fn write_points3d<P: AsRef<Path>>(path: P, points: &BTreeMap<Point3DId, Point3D>) -> Result<()> {
        let path = path.as_ref();
        write_with(path, |w| {
            w.write_all(POINTS3D_HEADER.as_bytes())?;
            for pt in points.values() {
                let [r, g, b] = pt.color;
                write!(
                    w,
                    "{} {} {} {} {} {} {} {}",
                    pt.id, pt.position.x, pt.position.y, pt.position.z, r, g, b, pt.error
                )?;
                for t in &pt.track {
                    write!(w, " {}", t)?;
                }
                writeln!(w)?;
            }
            Ok(())
        })?;
        log::debug!("wrote {} points to {}", points.len(), path.display());
        Ok(())
    }
}
