/// Single-page UI served at `/`. Cell values are inserted with `textContent`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>CSV to JSON Converter</title>
    <style>
        body { font-family: sans-serif; margin: 2em; }
        table { border-collapse: collapse; margin-bottom: 1em; }
        th, td { border: 1px solid #999; padding: 4px 8px; }
        pre { background: #f4f4f4; padding: 1em; max-height: 30em; overflow: auto; }
    </style>
</head>
<body>
    <h2>CSV to JSON Converter</h2>

    <form id="upload-form">
        <input id="file" name="file" type="file" accept=".csv" required>
        <button type="submit">Preview CSV</button>
    </form>

    <div id="preview"></div>

    <button id="convert-button" style="display:none;">Convert Uploaded CSV to JSON</button>
    <button id="convert-default-button">Convert Default CSV</button>
    <a href="/download" target="_blank"><button type="button">Download Last JSON</button></a>

    <pre id="log"></pre>

    <script>
        const fileInput = document.getElementById("file");
        const logBox = document.getElementById("log");

        function selectedFile() {
            const file = fileInput.files[0];
            if (!file || !file.name.endsWith(".csv")) {
                alert("Please upload a valid CSV file.");
                return null;
            }
            return file;
        }

        function formWith(file) {
            const formData = new FormData();
            formData.append("file", file);
            return formData;
        }

        function renderTablePreview(rows, columns) {
            const container = document.getElementById("preview");
            container.replaceChildren();
            if (!rows || rows.length === 0) {
                const p = document.createElement("p");
                p.textContent = "No data in file.";
                container.appendChild(p);
                return;
            }

            const table = document.createElement("table");
            const head = table.createTHead().insertRow();
            for (const col of columns) {
                const th = document.createElement("th");
                th.textContent = col;
                head.appendChild(th);
            }
            const body = table.createTBody();
            for (const row of rows) {
                const tr = body.insertRow();
                for (const col of columns) {
                    tr.insertCell().textContent = row[col] === null ? "" : row[col];
                }
            }
            container.appendChild(table);
        }

        function showResult(res, data, key) {
            if (res.ok) {
                logBox.textContent = JSON.stringify(data[key], null, 2);
            } else {
                logBox.textContent = "Error: " + (data.error || "Unknown error");
            }
        }

        document.getElementById("upload-form").addEventListener("submit", async (event) => {
            event.preventDefault();
            const file = selectedFile();
            if (!file) return;

            const res = await fetch("/upload-preview", { method: "POST", body: formWith(file) });
            const data = await res.json();
            if (res.ok) {
                renderTablePreview(data.preview, data.columns);
                document.getElementById("convert-button").style.display = "inline-block";
            } else {
                alert(data.error || "Preview failed.");
            }
        });

        document.getElementById("convert-button").addEventListener("click", async () => {
            const file = selectedFile();
            if (!file) return;
            logBox.textContent = "Converting uploaded CSV...";
            try {
                const res = await fetch("/upload", { method: "POST", body: formWith(file) });
                showResult(res, await res.json(), "rows");
            } catch (e) {
                logBox.textContent = "Request failed: " + e;
            }
        });

        document.getElementById("convert-default-button").addEventListener("click", async () => {
            logBox.textContent = "Converting default CSV...";
            try {
                const res = await fetch("/convert");
                showResult(res, await res.json(), "converted_data");
            } catch (e) {
                logBox.textContent = "Request failed: " + e;
            }
        });
    </script>
</body>
</html>
"#;
