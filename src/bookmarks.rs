//! Load-test bookmark generator.
//!
//! Emits a Netscape bookmark file of many distinct sites. Importing it into a
//! browser and opening every folder in tabs is a quick way to drive memory
//! pressure and watch the compressed-swap figures move.

const HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1><DL><p>
";

const FOLDER_SIZE: usize = 10;

/// Sites bundled with the binary, one host per line.
const BUNDLED_SITES: &str = include_str!("../assets/random-sites.txt");

/// Bundled site hosts, blank lines skipped.
pub fn bundled_sites() -> impl Iterator<Item = &'static str> {
    BUNDLED_SITES.lines().map(str::trim).filter(|s| !s.is_empty())
}

/// Build a bookmark file with the sites split into `Rand0`, `Rand1`, ...
/// folders of ten links each.
#[must_use]
pub fn generate<'a>(sites: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from(HEADER);
    out.push_str("<DT><H3>Rand0</H3><DL><p>\n");

    for (idx, site) in sites.into_iter().enumerate() {
        if idx > 0 && idx % FOLDER_SIZE == 0 {
            out.push_str(&format!(
                "</DL><p>\n<DT><H3>Rand{}</H3><DL><p>\n",
                idx / FOLDER_SIZE
            ));
        }
        let title = site.strip_prefix("www.").unwrap_or(site);
        out.push_str(&format!("     <DT><A HREF=\"https://{site}/\">{title}</A>\n"));
    }

    out.push_str("</DL><p>\n</DL><p>\n");
    out
}
