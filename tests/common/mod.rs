// * Shared fixtures for integration tests
#![allow(dead_code)]

/// Headerless page in the 15-column layout, preceded by a navigation table.
///
/// Rows: two full vessels, a colspan summary row, a row with exactly 12 filled
/// cells and a row with 11.
pub const HEADERLESS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="pt-br"><head>
<title>Navios Esperados</title>
<script>var rows = "<table><tr><td>not a table</td></tr></table>";</script>
</head><body>
<table id="menu"><tr><td><a href="/">Home</a></td><td><a href="/navios">Navios</a></td></tr></table>
<div class="lineup">
<table>
<tr>
  <td><b>MAERSK</b> SANTOS</td><td>Singapura</td><td>30014</td><td>LC</td><td>16/09/2025 00:54</td>
  <td>EMB/DESC</td><td>MAERSK BRASIL</td><td>Atracação</td><td>Contêineres</td><td>52000</td>
  <td>MS123A</td><td>2025123</td><td>A</td><td>Berço 3</td><td>BTP</td>
</tr>
<tr>
  <td>GRAIN STAR IMO 9412345</td><td>Libéria</td><td>19011</td><td>LC</td><td>07/09 8h</td>
  <td>EMB</td><td>CARGONAVE</td><td>Atracação</td><td>Soja em grãos</td><td>60000</td>
  <td>GS01</td><td>2025999</td><td>B</td><td>Armazém 39</td><td>T-GRÃO</td>
</tr>
<tr><td colspan="15">Total: 2 navios</td></tr>
<tr>
  <td>TANK ONE</td><td>Malta</td><td>183/11</td><td>LC</td><td></td>
  <td>EMB</td><td></td><td></td><td>Óleo de soja</td><td>30000</td>
  <td>TK9</td><td>2025777</td><td>C</td><td>Alamoa</td><td>Ultracargo</td>
</tr>
<tr>
  <td>SHORT ROW</td><td>Malta</td><td>183/11</td><td>LC</td><td></td>
  <td>EMB</td><td></td><td></td><td>Óleo de soja</td><td>30000</td>
  <td>TK9</td><td>2025778</td><td>C</td><td></td><td>Ultracargo</td>
</tr>
</table>
</div>
</body></html>"#;

/// Same vessel in the 14-column layout (no operation column)
pub const HEADERLESS_WITHOUT_OPERATION: &str = r#"<table>
<tr>
  <td>MSC ANNA</td><td>Panamá</td><td>399,9/16</td><td>LC</td><td>01-10-25 14:30</td>
  <td>DESC</td><td>MSC DO BRASIL</td><td>Contêineres</td><td>120000</td>
  <td>AN540R</td><td>2025456</td><td>A</td><td>Berço 1</td><td>Santos Brasil</td>
</tr>
</table>"#;

/// Page revision whose header is an ordinary first row of <td> cells
pub const PROMOTED_HEADER_PAGE: &str = r#"<table>
<tr><td>Navio</td><td>Bandeira</td><td>Comp/Calado</td><td>Chegada</td><td>Mercadoria</td>
    <td>Terminal</td><td>DUV</td><td>IMO</td><td>Peso</td><td>Viagem</td><td>Agência</td><td>Aviso</td></tr>
<tr><td>ATLANTIC SUN</td><td>Grécia</td><td>229/12,8</td><td>20/10/2025 06:00</td><td>Milho</td>
    <td>TGG</td><td>2025888</td><td>09387654</td><td>70000</td><td>AS7</td><td>WILLIAMS</td><td>EMB</td></tr>
</table>"#;

/// Headerless 15-column page whose DUV cells carry a suffix and no IMO
pub const SUFFIXED_DUV_PAGE: &str = r#"<table>
<tr>
  <td>NAVIO X</td><td>Malta</td><td>180/10</td><td>LC</td><td>16/09/2025 00:54</td>
  <td>DESC</td><td>AGENCIA X</td><td>Atracação</td><td>Milho</td><td>45000</td>
  <td>NX1</td><td>2025123-4</td><td>A</td><td>Berço 2</td><td>TGG</td>
</tr>
<tr>
  <td>NAVIO Y</td><td>Panamá</td><td>190/11</td><td>LC</td><td>17/09/2025 10:00</td>
  <td>EMB</td><td>AGENCIA Y</td><td>Atracação</td><td>Soja</td><td>50000</td>
  <td>NY2</td><td>2025124/01</td><td>B</td><td>Berço 4</td><td>TGG</td>
</tr>
</table>"#;

/// Labelled table whose first header spans the length and draft columns
pub const SPANNED_HEADER_PAGE: &str = r#"<table>
<tr><th colspan="2">Comp/Calado</th><th>Navio</th><th>Bandeira</th><th>Chegada</th><th>Mercadoria</th>
    <th>Terminal</th><th>DUV</th><th>Peso</th><th>Viagem</th><th>Agência</th><th>Aviso</th></tr>
<tr><td>180</td><td>10</td><td>X</td><td>Malta</td><td>20/10/2025 06:00</td><td>Milho</td>
    <td>TGG</td><td>2025321</td><td>70000</td><td>XV1</td><td>WILLIAMS</td><td>EMB</td></tr>
</table>"#;

/// Splits a document into fixed-size byte chunks, cutting through UTF-8 sequences
pub fn byte_chunks(html: &str, size: usize) -> Vec<Vec<u8>> {
    html.as_bytes().chunks(size).map(|c| c.to_vec()).collect()
}
