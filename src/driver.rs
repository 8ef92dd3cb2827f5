//! Batch driver: builds a [SkipList] from a file set, runs searches or removals read from the
//! same set, and prints what happened.
//!
//! A file set `num` in a directory consists of `construct_<num>.txt` (maximum height, value
//! count, then one value per line), and `search_<num>.txt` / `remove_<num>.txt` (value count,
//! then one value per line).

use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::{Direction, SkipList, SkipListError};

/// The directory file sets are read from unless `--dir` says otherwise.
pub const DEFAULT_DIR: &str = "test_files";

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{}: expected an integer, found {:?}", .path.display(), .line, .content)]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{}: unexpected end of file", .path.display(), .line)]
    MissingLine { path: PathBuf, line: usize },

    #[error("writing output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    SkipList(#[from] SkipListError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T, E = DriverError> = core::result::Result<T, E>;

/// What the driver does with a file set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `-c`: build the list and print it.
    Construct,
    /// `-s`: build the list and search it.
    Search,
    /// `-i`: build the list and search it by walking a cursor.
    SearchCursor,
    /// `-r`: build the list, remove values and print it backwards.
    Remove,
    /// `-g`: write a fresh `construct.txt` and `search.txt`.
    Generate,
}

impl Mode {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-c" => Some(Mode::Construct),
            "-s" => Some(Mode::Search),
            "-i" => Some(Mode::SearchCursor),
            "-r" => Some(Mode::Remove),
            "-g" => Some(Mode::Generate),
            _ => None,
        }
    }
}

/// The driver's command line: `-<mode> <num> [--dir <path>]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// The file set to read, or the number of values to generate.
    pub num: u32,
    pub dir: PathBuf,
}

impl Config {
    /// Parses the arguments following the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let flag = args
            .next()
            .ok_or_else(|| DriverError::Usage("missing mode".to_owned()))?;
        let mode = Mode::from_flag(&flag)
            .ok_or_else(|| DriverError::Usage(format!("unknown mode {:?}", flag)))?;

        let num = args
            .next()
            .ok_or_else(|| DriverError::Usage("missing file number".to_owned()))?;
        let num = num
            .parse()
            .map_err(|_| DriverError::Usage(format!("invalid file number {:?}", num)))?;

        let mut dir = PathBuf::from(DEFAULT_DIR);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dir" => {
                    dir = args
                        .next()
                        .map(PathBuf::from)
                        .ok_or_else(|| DriverError::Usage("--dir needs a path".to_owned()))?;
                }
                _ => return Err(DriverError::Usage(format!("unexpected argument {:?}", arg))),
            }
        }

        Ok(Config { mode, num, dir })
    }

    pub fn construct_path(&self) -> PathBuf {
        self.dir.join(format!("construct_{}.txt", self.num))
    }

    pub fn search_path(&self) -> PathBuf {
        self.dir.join(format!("search_{}.txt", self.num))
    }

    pub fn remove_path(&self) -> PathBuf {
        self.dir.join(format!("remove_{}.txt", self.num))
    }
}

pub fn usage(command: &str) -> String {
    format!(
        "usage : {command} -id num [--dir path]
where id is :
\tc : construct and print the skiplist with data read from file <path>/construct_num.txt
\ts : construct the skiplist with data read from file <path>/construct_num.txt and search elements from file <path>/search_num.txt
\t\tPrint statistics about the searches.
\ti : construct the skiplist with data read from file <path>/construct_num.txt and search, using an iterator, elements read from file <path>/search_num.txt
\t\tPrint statistics about the searches.
\tr : construct the skiplist with data read from file <path>/construct_num.txt, remove values read from file <path>/remove_num.txt and print the list in reverse order
\tg : generate num values into <path>/construct.txt and matching searches into <path>/search.txt
where num is the file number for input and path defaults to {DEFAULT_DIR}
"
    )
}

/// Reads one integer per line, keeping track of where it is for error messages.
struct Lines<'p, R> {
    path: &'p Path,
    lines: io::Lines<R>,
    line: usize,
}

impl<'p, R: BufRead> Lines<'p, R> {
    fn new(reader: R, path: &'p Path) -> Self {
        Lines {
            path,
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_int<T: FromStr>(&mut self) -> Result<T> {
        self.line += 1;

        let content = self
            .lines
            .next()
            .ok_or_else(|| DriverError::MissingLine {
                path: self.path.to_owned(),
                line: self.line,
            })?
            .map_err(|source| DriverError::Io {
                path: self.path.to_owned(),
                source,
            })?;

        content.trim().parse().map_err(|_| DriverError::Parse {
            path: self.path.to_owned(),
            line: self.line,
            content,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DriverError::Io {
            path: path.to_owned(),
            source,
        })
}

/// Builds a list from a construction file: maximum height, value count, then the values.
pub fn read_list<R: BufRead>(reader: R, path: &Path) -> Result<SkipList> {
    let mut lines = Lines::new(reader, path);

    let mut list = SkipList::new(lines.next_int()?)?;
    let count: usize = lines.next_int()?;

    for _ in 0..count {
        list.insert(lines.next_int()?);
    }

    Ok(list)
}

/// Reads a search or removal file: value count, then the values.
pub fn read_values<R: BufRead>(reader: R, path: &Path) -> Result<Vec<i64>> {
    let mut lines = Lines::new(reader, path);

    let count: usize = lines.next_int()?;

    (0..count).map(|_| lines.next_int()).collect()
}

/// Operation counts gathered over a batch of searches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub size: usize,
    pub searched: usize,
    pub found: usize,
    pub min: Option<usize>,
    pub max: usize,
    pub total: usize,
}

impl SearchStats {
    pub fn new(size: usize) -> Self {
        SearchStats {
            size,
            ..Default::default()
        }
    }

    pub fn record(&mut self, found: bool, operations: usize) {
        self.searched += 1;
        self.found += found as usize;
        self.min = Some(self.min.map_or(operations, |min| min.min(operations)));
        self.max = self.max.max(operations);
        self.total += operations;
    }

    /// Integer mean of the operation counts, 0 when nothing was searched.
    pub fn mean(&self) -> usize {
        self.total.checked_div(self.searched).unwrap_or(0)
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics : ")?;
        writeln!(f, "    Size of the list : {}", self.size)?;
        writeln!(f, "Search {} values :", self.searched)?;
        writeln!(f, "    Found {}", self.found)?;
        writeln!(f, "    Not found {}", self.searched - self.found)?;
        writeln!(f, "    Min number of operations : {}", self.min.unwrap_or(0))?;
        writeln!(f, "    Max number of operations : {}", self.max)?;
        writeln!(f, "    Mean number of operations : {}", self.mean())
    }
}

/// Prints the size of the list and every value, fetched by position.
pub fn construct<W: Write>(list: &SkipList, out: &mut W) -> Result<()> {
    writeln!(out, "Skiplist ({})", list.len())?;

    for index in 0..list.len() {
        write!(out, "{} ", list.ith(index)?)?;
    }

    Ok(())
}

/// Searches every query, printing each outcome and then the statistics.
pub fn search<W: Write>(list: &SkipList, queries: &[i64], out: &mut W) -> Result<SearchStats> {
    let mut stats = SearchStats::new(list.len());

    for &query in queries {
        let search = list.search(query);

        writeln!(out, "{} -> {}", query, search.found)?;
        stats.record(search.found, search.operations);
    }

    write!(out, "{}", stats)?;
    Ok(stats)
}

/// Like [search], but looks for every query by walking a forward cursor from the start. The
/// operation count is the number of values visited.
pub fn search_with_cursor<W: Write>(
    list: &SkipList,
    queries: &[i64],
    out: &mut W,
) -> Result<SearchStats> {
    let mut stats = SearchStats::new(list.len());
    let mut cursor = list.cursor(Direction::Forward);

    for &query in queries {
        let mut operations = 0;
        let mut found = false;

        cursor.begin();
        while !cursor.at_end() {
            operations += 1;

            if cursor.value()? == query {
                found = true;
                break;
            }

            cursor.advance();
        }

        writeln!(out, "{} -> {}", query, found)?;
        stats.record(found, operations);
    }

    write!(out, "{}", stats)?;
    Ok(stats)
}

/// Removes every value, then prints the size and the remaining values, largest first.
pub fn remove<W: Write>(list: &mut SkipList, values: &[i64], out: &mut W) -> Result<()> {
    for &value in values {
        list.remove(value);
    }

    writeln!(out, "Skiplist ({})", list.len())?;

    let mut cursor = list.cursor(Direction::Backward);
    while let Ok(value) = cursor.value() {
        write!(out, "{} ", value)?;
        cursor.advance();
    }

    Ok(())
}

/// Writes `construct.txt` with `count` random values and `search.txt` with random queries into
/// `dir`. The output only depends on `count`.
pub fn generate(count: u32, dir: &Path) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(count as u64);

    let max_height: usize = rng.gen_range(1..16);
    let max_value = rng.gen_range(1..10) * i64::from(count.max(1));

    let path = dir.join("construct.txt");
    write_file(&path, |out| {
        writeln!(out, "{}\n{}", max_height, count)?;
        (0..count).try_for_each(|_| writeln!(out, "{}", rng.gen_range(0..max_value)))
    })?;

    let mut rng = StdRng::seed_from_u64(rng.gen());
    let searches = count as usize * (max_height / 4);

    let path = dir.join("search.txt");
    write_file(&path, |out| {
        writeln!(out, "{}", searches)?;
        (0..searches).try_for_each(|_| writeln!(out, "{}", rng.gen_range(0..max_value)))
    })
}

fn write_file<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let to_error = |source| DriverError::Io {
        path: path.to_owned(),
        source,
    };

    let mut out = File::create(path).map(BufWriter::new).map_err(to_error)?;

    fill(&mut out).map_err(to_error)?;
    out.flush().map_err(to_error)
}

/// Runs the mode `config` asks for, printing to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let build = || -> Result<SkipList> {
        let path = config.construct_path();
        read_list(open(&path)?, &path)
    };

    match config.mode {
        Mode::Construct => construct(&build()?, out),
        Mode::Search => {
            let list = build()?;
            let path = config.search_path();
            search(&list, &read_values(open(&path)?, &path)?, out).map(drop)
        }
        Mode::SearchCursor => {
            let list = build()?;
            let path = config.search_path();
            search_with_cursor(&list, &read_values(open(&path)?, &path)?, out).map(drop)
        }
        Mode::Remove => {
            let mut list = build()?;
            let path = config.remove_path();
            remove(&mut list, &read_values(open(&path)?, &path)?, out)
        }
        Mode::Generate => generate(config.num, &config.dir),
    }
}

#[cfg(test)]
mod driver_test {
    use super::*;

    const CONSTRUCT: &str = "4\n4\n10\n5\n20\n5\n";

    fn build(contents: &str) -> Result<SkipList> {
        read_list(contents.as_bytes(), Path::new("construct_1.txt"))
    }

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_config() {
        let config = Config::from_args(args(&["-s", "3"])).unwrap();

        assert_eq!(config.mode, Mode::Search);
        assert_eq!(config.num, 3);
        assert_eq!(config.search_path(), Path::new("test_files/search_3.txt"));

        let config = Config::from_args(args(&["-r", "12", "--dir", "data"])).unwrap();

        assert_eq!(config.mode, Mode::Remove);
        assert_eq!(config.construct_path(), Path::new("data/construct_12.txt"));
        assert_eq!(config.remove_path(), Path::new("data/remove_12.txt"));
    }

    #[test]
    fn test_config_errors() {
        for bad in [
            &[][..],
            &["-x", "1"][..],
            &["-c"][..],
            &["-c", "one"][..],
            &["-c", "1", "--dir"][..],
            &["-c", "1", "extra"][..],
        ] {
            assert!(matches!(
                Config::from_args(args(bad)),
                Err(DriverError::Usage(_))
            ));
        }
    }

    #[test]
    fn test_read_list() {
        let list = build(CONSTRUCT).unwrap();

        assert_eq!(list.max_height(), 4);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![5, 10, 20]);
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            build("4\n3\n1\n2\n"),
            Err(DriverError::MissingLine { line: 5, .. })
        ));
        assert!(matches!(
            build("4\n2\n1\nten\n"),
            Err(DriverError::Parse { line: 4, ref content, .. }) if content == "ten"
        ));
        assert!(matches!(
            build("0\n0\n"),
            Err(DriverError::SkipList(SkipListError::ZeroHeight))
        ));
        assert!(matches!(
            build("-2\n0\n"),
            Err(DriverError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_values() {
        let path = Path::new("search_1.txt");

        assert_eq!(
            read_values(" 3\n7 \n-1\n7\n".as_bytes(), path).unwrap(),
            vec![7, -1, 7]
        );
        assert_eq!(read_values("0\n".as_bytes(), path).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_construct() {
        let mut out = Vec::new();

        construct(&build(CONSTRUCT).unwrap(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Skiplist (3)\n5 10 20 ");
    }

    #[test]
    fn test_search() {
        let list = build(CONSTRUCT).unwrap();
        let mut out = Vec::new();

        let stats = search(&list, &[20, 7], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("20 -> true\n7 -> false\nStatistics : \n"));
        assert!(out.contains("    Size of the list : 3\n"));
        assert!(out.contains("Search 2 values :\n    Found 1\n    Not found 1\n"));

        assert_eq!(stats.searched, 2);
        assert_eq!(stats.found, 1);
        assert!(stats.min.unwrap() >= 1);
        assert!(stats.max >= stats.min.unwrap());
        assert_eq!(stats.mean(), stats.total / 2);
    }

    #[test]
    fn test_search_with_cursor() {
        let list = build(CONSTRUCT).unwrap();
        let mut out = Vec::new();

        let stats = search_with_cursor(&list, &[5, 20, 7], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "5 -> true\n20 -> true\n7 -> false\n\
             Statistics : \n    Size of the list : 3\nSearch 3 values :\n    Found 2\n    Not found 1\n\
             \x20   Min number of operations : 1\n    Max number of operations : 3\n    Mean number of operations : 2\n"
        );
        assert_eq!(stats.total, 1 + 3 + 3);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SearchStats::new(0);

        assert_eq!(stats.mean(), 0);
        assert!(format!("{}", stats).contains("Min number of operations : 0"));
    }

    #[test]
    fn test_remove() {
        let mut list = build(CONSTRUCT).unwrap();
        let mut out = Vec::new();

        remove(&mut list, &[10, 11, 10], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Skiplist (2)\n20 5 ");
    }

    #[test]
    fn test_generate() {
        let dir = std::env::temp_dir().join(format!("skipset-generate-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        generate(50, &dir).unwrap();

        let path = dir.join("construct.txt");
        let list = read_list(open(&path).unwrap(), &path).unwrap();
        assert!(list.len() <= 50 && list.len() > 0);
        assert!((1..16).contains(&list.max_height()));

        let path = dir.join("search.txt");
        let searches = read_values(open(&path).unwrap(), &path).unwrap();
        assert_eq!(searches.len(), 50 * (list.max_height() / 4));

        // same count, same files
        let first = std::fs::read_to_string(dir.join("construct.txt")).unwrap();
        generate(50, &dir).unwrap();
        assert_eq!(first, std::fs::read_to_string(dir.join("construct.txt")).unwrap());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_missing_file() {
        let config = Config {
            mode: Mode::Construct,
            num: 1,
            dir: PathBuf::from("no/such/dir"),
        };

        assert!(matches!(
            run(&config, &mut Vec::<u8>::new()),
            Err(DriverError::Io { .. })
        ));
    }
}
