/// Company identifiers from the [SEC]'s legacy EDGAR CIK lookup page.
///
/// [SEC]: https://www.sec.gov/cgi-bin/cik_lookup
pub mod cik;
