/*!

This is the long-form manual for `maturity_scoring` and `matrad`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values with a header row
* `xlsx` Excel spreadsheet with the same layout as the CSV file

### `csv`

The questionnaire. The columns `classe` (the class code) and `pergunta` (the text)
are mandatory and looked up by name in the header. Other columns are ignored.

```text
classe,pergunta
1.0,Governance
1.1,Is there a code of conduct?
1.2,Is the code of conduct reviewed every year?
2.0,Risk management
2.1,Are the risks of the company mapped?
```

A class code ending in `.0` is the title of a category. Every other code is a
question scored from 0 to 5, and belongs to the category with the same integer
part (`1.2` belongs to `1.0`). If a question appears before its category title,
the category is created without a title and the title is filled in later if it
shows up.

### `xlsx`

The first row of the worksheet must contain the `classe` and `pergunta` headers.
Numeric class codes are read the way a spreadsheet displays them: the number
`1` in a cell is the code `1.0`.

## Answers

Answers are typed on the terminal, or read from a JSON file with the `--answers` flag:

```text
{ "1.1": 5, "1.2": 3, "2.1": 4 }
```

Every value must be between 0 and 5. Questions without an answer count as 0.

## Scoring

The score of a category is the sum of the answers of its questions, divided by the
maximum possible sum (5 times the number of questions), in percent. Categories
without any question are left out of the chart and of the export.

## Outputs

- a spreadsheet (default `respostas_e_grafico.xlsx`) with two sheets:
  `Respostas` (question, answer) and `Gráfico` (category, percentage, and the
  picture of the chart at cell `E2`)
- optionally, the radar chart as a PNG file (`--chart`)
- a JSON summary of the scores (`--summary`), which can be compared against a
  reference summary (`--reference`)

## Configuration

All the flags can also be set in a JSON configuration file passed with `--config`.
Paths are relative to the directory of the configuration file. Flags given on the
command line take precedence.

```text
{
  "outputSettings": {
    "title": "Compliance and process maturity matrix",
    "outputDirectory": "out",
    "workbookName": "respostas_e_grafico.xlsx",
    "chartName": "grafico.png"
  },
  "questionSources": [
    { "provider": "csv", "filePath": "questions.csv" }
  ],
  "participant": {
    "name": "Ana", "email": "ana@example.com", "company": "ACME", "phone": "555-0100"
  },
  "answers": { "1.1": 5, "1.2": 3 }
}
```

When several question sources are listed, their rows are read in order and grouped together.
`participant` and `answers` are optional: whatever is missing is asked on the terminal.

 */
